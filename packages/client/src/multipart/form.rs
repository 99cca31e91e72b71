//! Multipart body serialization
//!
//! Writes every part between boundary delimiters, in insertion order, and
//! closes the body with the terminal `--boundary--` line.

use bytes::{BufMut, Bytes, BytesMut};

use super::types::{MultipartBody, Part, PartSource};
use crate::error::{self, Result};

impl MultipartBody {
    /// Serialize all parts. File-backed parts are read from disk here.
    ///
    /// # Errors
    ///
    /// Returns a `Body` error if a file-backed part cannot be read.
    pub fn encode(&self) -> Result<Bytes> {
        let mut out = BytesMut::new();

        for (name, part) in &self.parts {
            out.put_slice(format!("--{}\r\n", self.boundary).as_bytes());
            write_part_headers(&mut out, name, part);
            out.put_slice(b"\r\n");
            write_part_payload(&mut out, part)?;
            out.put_slice(b"\r\n");
        }

        out.put_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        Ok(out.freeze())
    }
}

fn write_part_headers(out: &mut BytesMut, name: &str, part: &Part) {
    match part.file_name_ref() {
        Some(file_name) => out.put_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                escape_quotes(name),
                escape_quotes(file_name)
            )
            .as_bytes(),
        ),
        None => out.put_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"\r\n",
                escape_quotes(name)
            )
            .as_bytes(),
        ),
    }

    if let Some(content_type) = part.resolved_content_type() {
        out.put_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
    }

    for (header, value) in &part.meta.headers {
        out.put_slice(header.as_str().as_bytes());
        out.put_slice(b": ");
        out.put_slice(value.as_bytes());
        out.put_slice(b"\r\n");
    }
}

fn write_part_payload(out: &mut BytesMut, part: &Part) -> Result<()> {
    match &part.source {
        PartSource::Text(text) => out.put_slice(text.as_bytes()),
        PartSource::Bytes(bytes) => out.put_slice(bytes),
        PartSource::File(path) => {
            let contents = std::fs::read(path).map_err(|e| {
                error::body(std::io::Error::new(
                    e.kind(),
                    format!("cannot read part file {}: {e}", path.display()),
                ))
            })?;
            out.put_slice(&contents);
        }
    }
    Ok(())
}

fn escape_quotes(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
