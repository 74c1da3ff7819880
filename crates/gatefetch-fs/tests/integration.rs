use std::io::Write;

use gatefetch_fs::{Result, Staging, remove_if_exists};
use tempfile::tempdir;

#[test]
fn test_commit_leaves_no_debris() -> Result<()> {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("archive.7z");

    let (mut file, staging) = Staging::new(&dest)?;
    file.write_all(b"payload").unwrap();
    file.sync_all().unwrap();
    drop(file);
    staging.commit()?;

    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("archive.7z")]);
    Ok(())
}

#[test]
fn test_discard_keeps_existing_destination_until_removed() -> Result<()> {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("archive.7z");
    std::fs::write(&dest, "previous").unwrap();

    {
        let (mut file, _staging) = Staging::new(&dest)?;
        file.write_all(b"rejected").unwrap();
    }

    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "previous");
    assert!(remove_if_exists(&dest)?);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    Ok(())
}

#[test]
fn test_creates_missing_parent_dirs() -> Result<()> {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("a").join("b").join("out.bin");

    let (_file, staging) = Staging::new(&dest)?;
    assert!(dest.parent().unwrap().is_dir());
    assert_eq!(staging.destination(), dest.as_path());
    Ok(())
}
