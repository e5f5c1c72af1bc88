//! Asynchronous raster sources.

use std::future::Future;

use super::{decode_image, DecodeError, Raster};

/// Something that can produce a decoded raster, possibly asynchronously.
///
/// Each source is loaded independently; the pipeline joins all loads before
/// compositing.
pub trait RasterSource {
    /// Name used to key persisted lines and log messages.
    fn name(&self) -> &str;

    /// Decode the source into a raster.
    fn load(&self) -> impl Future<Output = Result<Raster, DecodeError>>;
}

/// An encoded image file held in memory.
#[derive(Debug, Clone)]
pub struct EncodedSource {
    name: String,
    bytes: Vec<u8>,
}

impl EncodedSource {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

impl RasterSource for EncodedSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&self) -> Result<Raster, DecodeError> {
        decode_image(&self.bytes)
    }
}

/// An already decoded raster.
#[derive(Debug, Clone)]
pub struct DecodedSource {
    name: String,
    raster: Raster,
}

impl DecodedSource {
    pub fn new(name: impl Into<String>, raster: Raster) -> Self {
        Self {
            name: name.into(),
            raster,
        }
    }
}

impl RasterSource for DecodedSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&self) -> Result<Raster, DecodeError> {
        Ok(self.raster.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_encoded_source_reports_decode_failure() {
        let source = EncodedSource::new("broken.jpg", vec![0xFF, 0xD8, 0x00]);
        assert_eq!(source.name(), "broken.jpg");
        assert!(block_on(source.load()).is_err());
    }

    #[test]
    fn test_decoded_source_returns_copy() {
        let raster = Raster::filled(2, 2, [9, 9, 9, 255]);
        let source = DecodedSource::new("a.png", raster.clone());
        assert_eq!(block_on(source.load()).unwrap(), raster);
    }
}
