use tempfile::TempDir;

use super::*;

#[tokio::test]
async fn create_pretruncates_part_file() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("blob.bin");

    let file = DownloadFile::create(&target, 65536).await.unwrap();
    assert_eq!(file.part_path(), temp.path().join("blob.bin.part"));

    let metadata = tokio::fs::metadata(file.part_path()).await.unwrap();
    assert_eq!(metadata.len(), 65536);
    assert!(!target.exists());
}

#[tokio::test]
async fn part_name_keeps_full_extension() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("archive.tar.gz");

    let file = DownloadFile::create(&target, 1).await.unwrap();
    assert_eq!(file.part_path(), temp.path().join("archive.tar.gz.part"));
    file.discard().await;
}

#[tokio::test]
async fn positional_writes_and_commit() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("out.dat");

    let file = DownloadFile::create(&target, 96).await.unwrap();

    // Two writers, disjoint ranges, written out of order.
    let mut w1 = file.writer().await.unwrap();
    let mut w2 = file.writer().await.unwrap();
    w2.write_at(64, &[2u8; 32]).await.unwrap();
    w1.write_at(0, &[1u8; 32]).await.unwrap();
    w1.write_at(32, &[3u8; 32]).await.unwrap();

    file.commit().await.unwrap();

    let contents = tokio::fs::read(&target).await.unwrap();
    assert_eq!(&contents[..32], &[1u8; 32]);
    assert_eq!(&contents[32..64], &[3u8; 32]);
    assert_eq!(&contents[64..], &[2u8; 32]);
    assert!(!target.with_file_name("out.dat.part").exists());
}

#[tokio::test]
async fn discard_removes_part_file() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("gone.bin");

    let file = DownloadFile::create(&target, 16).await.unwrap();
    let part = file.part_path().to_path_buf();
    assert!(part.exists());

    file.discard().await;
    assert!(!part.exists());
    assert!(!target.exists());
}
