use md5::{Digest, Md5};
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use crate::errors::Result;

const BUFFER_SIZE: usize = 8192; // 8KB

/// Lowercase hex MD5 of a file's content, streamed in fixed-size chunks so
/// the whole file is never held in memory. MD5 because S3 reports the ETag
/// of a single-part upload as the object's MD5.
pub fn md5_hex(path: &Path) -> Result<String> {
    let mut reader = BufReader::with_capacity(BUFFER_SIZE, File::open(path)?);
    let mut buf = vec![0u8; BUFFER_SIZE];
    let mut hasher = Md5::new();

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}
