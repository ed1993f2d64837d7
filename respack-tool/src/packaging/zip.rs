use std::path::Path;

use async_zip::base::write::ZipFileWriter;
use async_zip::{Compression, ZipDateTime, ZipEntryBuilder};
use chrono::{DateTime, Utc};
use futures::io::AsyncWrite;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio_util::compat::TokioAsyncReadCompatExt;

use super::FileEntry;
use crate::error::PackError;

/// Streams every entry into a new ZIP file at `output`, in the given order.
pub async fn write_zip_file(output: &Path, entries: &[FileEntry]) -> Result<(), PackError> {
    let file = File::create(output).await?;
    let mut writer = ZipFileWriter::with_tokio(file);

    for entry in entries {
        append_file(&mut writer, entry).await?;
    }

    let mut file = writer.close().await?.into_inner();
    file.flush().await?;
    Ok(())
}

async fn append_file<W>(writer: &mut ZipFileWriter<W>, entry: &FileEntry) -> Result<(), PackError>
where
    W: AsyncWrite + Unpin,
{
    let source = File::open(&entry.path).await?;
    let modified: DateTime<Utc> = source.metadata().await?.modified()?.into();

    let builder = ZipEntryBuilder::new(entry.name_in_archive.clone().into(), Compression::Deflate)
        .last_modification_date(ZipDateTime::from_chrono(&modified));

    let mut entry_writer = writer.write_entry_stream(builder).await?;
    futures::io::copy(source.compat(), &mut entry_writer).await?;
    entry_writer.close().await?;
    Ok(())
}
