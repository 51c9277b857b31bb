/*!
This module defines the on-disk format for saved model arrays: a single format-version byte followed by the MessagePack encoding of the array.
*/

use ndarray::prelude::*;
use std::io::{Read, Write};
use std::path::Path;

const FORMAT_VERSION: u8 = 0;

/// The ways reading a saved model array can fail. Callers that soft-fail
/// should log the variant before collapsing to "no model", so the root
/// cause is still visible in the participant's log.
#[derive(thiserror::Error, Debug)]
pub enum LoadModelError {
	#[error("model file not found")]
	NotFound,
	#[error("io error: {0}")]
	Io(std::io::Error),
	#[error("unknown format version {0}")]
	BadVersion(u8),
	#[error("deserialization error: {0}")]
	Deserialize(#[from] rmp_serde::decode::Error),
}

impl From<std::io::Error> for LoadModelError {
	fn from(error: std::io::Error) -> Self {
		if error.kind() == std::io::ErrorKind::NotFound {
			LoadModelError::NotFound
		} else {
			LoadModelError::Io(error)
		}
	}
}

/// Read a model array by reading the file at `path`.
pub fn read_array(path: &Path) -> Result<Array1<f32>, LoadModelError> {
	let file = std::fs::File::open(path)?;
	let mut reader = std::io::BufReader::new(file);
	let mut version = [0u8; 1];
	reader.read_exact(&mut version)?;
	if version[0] != FORMAT_VERSION {
		return Err(LoadModelError::BadVersion(version[0]));
	}
	let array = rmp_serde::from_read(&mut reader)?;
	Ok(array)
}

/// Write a model array to the file at `path`.
pub fn write_array(path: &Path, array: &Array1<f32>) -> std::io::Result<()> {
	let file = std::fs::File::create(path)?;
	let mut writer = std::io::BufWriter::new(file);
	writer.write_all(&[FORMAT_VERSION])?;
	rmp_serde::encode::write_named(&mut writer, array)
		.map_err(|error| std::io::Error::new(std::io::ErrorKind::InvalidData, error))?;
	writer.flush()?;
	Ok(())
}

#[test]
fn test_round_trip() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("server.model");
	let array = array![1.0, 2.0, 4.0];
	write_array(&path, &array).unwrap();
	let loaded = read_array(&path).unwrap();
	assert_eq!(loaded, array);
}

#[test]
fn test_missing_file_is_not_found() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("absent.model");
	match read_array(&path) {
		Err(LoadModelError::NotFound) => {}
		other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
	}
}

#[test]
fn test_unknown_version_is_rejected() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("server.model");
	std::fs::write(&path, &[9u8, 0, 0]).unwrap();
	match read_array(&path) {
		Err(LoadModelError::BadVersion(9)) => {}
		other => panic!("expected BadVersion, got {:?}", other.map(|_| ())),
	}
}

#[test]
fn test_truncated_file_is_deserialize_error() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("server.model");
	std::fs::write(&path, &[0u8]).unwrap();
	match read_array(&path) {
		Err(LoadModelError::Deserialize(_)) => {}
		other => panic!("expected Deserialize, got {:?}", other.map(|_| ())),
	}
}
