use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use gatefetch_fetch::{ClientSettings, DEFAULT_BLOCK_SIZE, HashAlgorithm, ProbeOptions, TransferRequest};
use reqwest::Url;

#[derive(Clone, Debug, Parser)]
#[command(name = "gatefetch", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct App {
    /// Resource to download.
    #[arg(env = "GATEFETCH_URL")]
    pub url: String,

    /// Where the verified file is placed.
    #[arg(env = "GATEFETCH_OUTPUT")]
    pub output: PathBuf,

    /// Expected hex digest; the file is kept only if it matches.
    #[arg(short, long, env = "GATEFETCH_DIGEST")]
    pub digest: Option<String>,

    #[arg(short, long, env = "GATEFETCH_ALGORITHM", default_value = "md5")]
    pub algorithm: HashAlgorithm,

    /// Extra attempts when the connection fails or the server is busy.
    #[arg(long, env = "GATEFETCH_RETRIES", default_value_t = 3)]
    pub retries: u32,

    /// Size of the first read in bytes; later reads adapt to throughput.
    #[arg(long, env = "GATEFETCH_BLOCK_SIZE", default_value_t = DEFAULT_BLOCK_SIZE)]
    pub block_size: usize,

    /// Media type the server must declare, e.g. application/zip.
    #[arg(long, env = "GATEFETCH_CONTENT_TYPE")]
    pub content_type: Option<String>,

    /// Refuse resources that do not declare a Content-Length.
    #[arg(long, env = "GATEFETCH_REQUIRE_LENGTH")]
    pub require_length: bool,

    /// Skip the HEAD probe.
    #[arg(long, env = "GATEFETCH_NO_PROBE", conflicts_with_all = ["content_type", "require_length"])]
    pub no_probe: bool,

    /// Give up when the server sends nothing for this many seconds; 0 waits forever.
    #[arg(long, env = "GATEFETCH_READ_TIMEOUT", default_value_t = 30)]
    pub read_timeout: u64,

    #[arg(long, env = "GATEFETCH_USER_AGENT", default_value = "Mozilla/5.0")]
    pub user_agent: String,

    /// HTTP or HTTPS proxy; may be given more than once.
    #[arg(long = "proxy", env = "GATEFETCH_PROXY", value_delimiter = ',')]
    pub proxies: Vec<Url>,

    #[arg(long, env = "GATEFETCH_PROGRESS", value_enum, default_value_t = ProgressMode::Bar)]
    pub progress: ProgressMode,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, env = "GATEFETCH_VERBOSE")]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProgressMode {
    /// Progress bar on stderr.
    Bar,
    /// One JSON object per event on stdout.
    Json,
    None,
}

impl App {
    pub fn client_settings(&self) -> ClientSettings {
        let mut settings = ClientSettings::default().user_agent(&self.user_agent);
        if self.read_timeout > 0 {
            settings = settings.read_timeout(Duration::from_secs(self.read_timeout));
        }

        self.proxies.iter().cloned().fold(settings, ClientSettings::proxy)
    }

    /// The transfer described by the arguments, without observers.
    pub fn request(&self) -> TransferRequest {
        let mut request = TransferRequest::new(&self.url, &self.output)
            .digest_algorithm(self.algorithm)
            .max_retries(self.retries)
            .block_size(self.block_size);

        if let Some(digest) = &self.digest {
            request = request.expected_digest(digest);
        }

        if !self.no_probe {
            let mut probe = ProbeOptions::default().require_content_length(self.require_length);
            if let Some(content_type) = &self.content_type {
                probe = probe.expected_content_type(content_type);
            }
            request = request.probe(probe);
        }

        request
    }

    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "gatefetch=debug,gatefetch_fetch=debug"
        } else {
            "gatefetch=info,gatefetch_fetch=info"
        }
    }
}
