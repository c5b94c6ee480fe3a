use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use bincode;
use bincode::Options;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),
    #[error("corrupt data: {0}")]
    Corrupt(String),
}

pub fn save_to_disk<T: Serialize, TPath: AsRef<Path>>(
    data: &T,
    path: TPath,
) -> Result<(), SerializationError> {
    let options = bincode::DefaultOptions::new();
    let options = options.with_no_limit();
    // Write all bytes to the target file
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    options.serialize_into(&mut writer, data)?;
    writer.flush()?;
    Ok(())
}

pub fn load_from_disk<T: DeserializeOwned, TPath: AsRef<Path>>(
    path: TPath,
) -> Result<T, SerializationError> {
    // Open the file and read all bytes
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let options = bincode::DefaultOptions::new();
    let options = options.with_no_limit();
    Ok(options.deserialize_from(reader)?)
}
