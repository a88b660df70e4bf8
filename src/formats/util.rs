use std::path::Path;

use byteorder::{ByteOrder as _, LittleEndian};

use super::{FormatError, Result};

pub(crate) fn extension(path: &Path) -> Result<String> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(|value| value.to_ascii_lowercase())
        .ok_or_else(|| FormatError::UnsupportedFormat(path.to_string_lossy().to_string()))?;
    Ok(ext)
}

pub(crate) fn u16_to_le_bytes(samples: &[u16]) -> Vec<u8> {
    let mut bytes = vec![0; samples.len() * 2];
    LittleEndian::write_u16_into(samples, &mut bytes);
    bytes
}

pub(crate) fn u32_to_le_bytes(samples: &[u32]) -> Vec<u8> {
    let mut bytes = vec![0; samples.len() * 4];
    LittleEndian::write_u32_into(samples, &mut bytes);
    bytes
}

pub(crate) fn f32_to_le_bytes(samples: &[f32]) -> Vec<u8> {
    let mut bytes = vec![0; samples.len() * 4];
    LittleEndian::write_f32_into(samples, &mut bytes);
    bytes
}
