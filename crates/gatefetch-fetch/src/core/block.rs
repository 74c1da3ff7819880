use std::time::Duration;

/// Default size of the first read, in bytes.
pub const DEFAULT_BLOCK_SIZE: usize = 16 * 1024;

/// Hard ceiling for a single read, in bytes.
pub const MAX_BLOCK_SIZE: usize = 4 * 1024 * 1024;

/// Reads faster than this are treated as instantaneous.
const INSTANT_READ: Duration = Duration::from_millis(1);

/// Choose the next read size from the last block's size and read time.
///
/// The result tracks the observed throughput (bytes per second) but never
/// moves more than a factor of two away from the last block, and always lies
/// in `[1, MAX_BLOCK_SIZE]`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use gatefetch_fetch::core::best_block_size;
///
/// // Instant reads double the block.
/// assert_eq!(best_block_size(Duration::ZERO, 16384), 32768);
///
/// // 16 KiB in one second: the rate sits inside the range.
/// assert_eq!(best_block_size(Duration::from_secs(1), 16384), 16384);
///
/// // A slow read halves it at most.
/// assert_eq!(best_block_size(Duration::from_secs(60), 16384), 8192);
/// ```
pub fn best_block_size(elapsed: Duration, chunk: usize) -> usize {
    let chunk = chunk as f64;
    let upper = (chunk * 2.0).max(1.0).min(MAX_BLOCK_SIZE as f64);
    let lower = (chunk / 2.0).max(1.0).min(upper);

    if elapsed < INSTANT_READ {
        return upper as usize;
    }

    let rate = chunk / elapsed.as_secs_f64();
    rate.clamp(lower, upper) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instant_read_jumps_to_upper_bound() {
        assert_eq!(best_block_size(Duration::from_micros(999), 1000), 2000);
        assert_eq!(best_block_size(Duration::ZERO, 3 * 1024 * 1024), MAX_BLOCK_SIZE);
    }

    #[test]
    fn test_rate_inside_range_is_used() {
        // 10_000 bytes in 0.5s -> 20_000 B/s, inside [5_000, 20_000]
        assert_eq!(best_block_size(Duration::from_millis(500), 10_000), 20_000);
        // 10_000 bytes in 0.625s -> 16_000 B/s
        assert_eq!(best_block_size(Duration::from_millis(625), 10_000), 16_000);
    }

    #[test]
    fn test_rate_is_clamped() {
        assert_eq!(best_block_size(Duration::from_millis(2), 10_000), 20_000);
        assert_eq!(best_block_size(Duration::from_secs(100), 10_000), 5_000);
    }

    #[test]
    fn test_tiny_chunks_never_reach_zero() {
        assert_eq!(best_block_size(Duration::from_secs(10), 1), 1);
        assert_eq!(best_block_size(Duration::from_secs(10), 0), 1);
        assert_eq!(best_block_size(Duration::ZERO, 0), 1);
    }

    #[test]
    fn test_oversized_chunk_respects_ceiling() {
        // The lower bound (5 MiB) would exceed the ceiling; the ceiling wins.
        let chunk = 10 * 1024 * 1024;
        assert_eq!(best_block_size(Duration::from_secs(100), chunk), MAX_BLOCK_SIZE);
        assert_eq!(best_block_size(Duration::ZERO, chunk), MAX_BLOCK_SIZE);
    }

    #[test]
    fn test_always_within_bounds() {
        let chunks = [0, 1, 2, 3, 511, 4096, 16384, 1 << 20, MAX_BLOCK_SIZE, MAX_BLOCK_SIZE * 3];
        let times = [
            Duration::ZERO,
            Duration::from_nanos(1),
            Duration::from_millis(1),
            Duration::from_millis(37),
            Duration::from_secs(1),
            Duration::from_secs(3600),
        ];

        for &chunk in &chunks {
            for &elapsed in &times {
                let size = best_block_size(elapsed, chunk);
                assert!(
                    (1..=MAX_BLOCK_SIZE).contains(&size),
                    "chunk {chunk} in {elapsed:?} gave {size}"
                );
            }
        }
    }
}
