//! Image XObject descriptor
//! Created: 2026-10-17

use lopdf::{Dictionary, Object, ObjectId, Stream};
use tracing::debug;

use crate::error::{ImageError, Result};

/// An image occurrence as handed over by the content model
#[derive(Debug, Clone)]
pub struct PdfImage {
    /// Identity of the image object, shared by every occurrence of it
    pub id: ObjectId,
    pub width: u32,
    pub height: u32,
    pub bits_per_component: Option<u8>,
    /// Colour space family name, `None` when the dictionary has none
    pub color_space: Option<String>,
    /// Indexed colour table as RGB triples, read when the base space is
    /// DeviceRGB and the table is an inline string
    pub lookup: Option<Vec<u8>>,
    /// The raw `Filter` entry: absent, a name or an array of names
    pub filter: Option<Object>,
    /// Bit-packed samples, rows padded to whole bytes
    pub samples: Vec<u8>,
    /// Encoded image file (PNG, JPEG, ...) used by the raster branch
    pub container: Option<Vec<u8>>,
}

impl PdfImage {
    pub fn new(id: ObjectId, width: u32, height: u32) -> Self {
        Self {
            id,
            width,
            height,
            bits_per_component: None,
            color_space: None,
            lookup: None,
            filter: None,
            samples: Vec::new(),
            container: None,
        }
    }

    pub fn with_bits_per_component(mut self, bpc: u8) -> Self {
        self.bits_per_component = Some(bpc);
        self
    }

    pub fn with_color_space(mut self, name: &str) -> Self {
        self.color_space = Some(name.to_string());
        self
    }

    pub fn with_lookup(mut self, table: Vec<u8>) -> Self {
        self.lookup = Some(table);
        self
    }

    pub fn with_filter(mut self, filter: Object) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_samples(mut self, samples: Vec<u8>) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_container(mut self, bytes: Vec<u8>) -> Self {
        self.container = Some(bytes);
        self
    }

    /// Reads an image XObject.
    ///
    /// Leading Flate and LZW filters are decoded here, so `samples` holds
    /// the stream content after them and `filter` lists only the image
    /// codecs that remain (`None` when there are none). Write edited
    /// samples back with [`Stream::set_plain_content`] or re-apply the
    /// compression. Content left under a lone DCT filter is a complete
    /// JPEG file and also serves as the container.
    pub fn from_stream(id: ObjectId, stream: &Stream) -> Result<Self> {
        let dict = &stream.dict;
        let width = dimension(dict, b"Width")?;
        let height = dimension(dict, b"Height")?;

        let bits_per_component = match dict.get(b"BitsPerComponent") {
            Ok(object) => {
                let bpc = object
                    .as_i64()
                    .map_err(|_| ImageError::InvalidDictionary("BitsPerComponent is not a number".to_string()))?;
                Some(u8::try_from(bpc).map_err(|_| ImageError::InvalidDictionary(format!("BitsPerComponent {} out of range", bpc)))?)
            }
            Err(_) => None,
        };

        let color_space = dict.get(b"ColorSpace").ok().and_then(color_space_name);
        let lookup = dict.get(b"ColorSpace").ok().and_then(rgb_lookup);
        let filter = dict.get(b"Filter").ok().cloned();

        // malformed filter entries are kept untouched and block direct editing
        let names = match &filter {
            None | Some(Object::Null) => Vec::new(),
            Some(_) => stream.filters().unwrap_or_default(),
        };
        let decoded = names
            .iter()
            .take_while(|name| STREAM_CODECS.contains(&name.as_str()))
            .count();

        let mut image = Self::new(id, width, height);
        image.bits_per_component = bits_per_component;
        image.color_space = color_space;
        image.lookup = lookup;

        if decoded == 0 {
            image.samples = stream.content.clone();
            image.filter = filter;
        } else {
            debug!("image {:?}: decoding {:?}", id, &names[..decoded]);
            image.samples = decode_stream_codecs(stream, &names[..decoded])?;
            image.filter = filter_object(&names[decoded..]);
        }

        if names[decoded..] == ["DCTDecode"] {
            image.container = Some(image.samples.clone());
        }
        Ok(image)
    }
}

/// Generic stream compressions; every other filter is an image codec
const STREAM_CODECS: [&str; 2] = ["FlateDecode", "LZWDecode"];

/// Runs the content through `codecs` only.
///
/// lopdf refuses to decompress streams typed as images, so the content is
/// decoded through a bare stream carrying just the filter chain.
fn decode_stream_codecs(stream: &Stream, codecs: &[String]) -> Result<Vec<u8>> {
    let mut dict = Dictionary::new();
    dict.set("Filter", codecs.iter().map(|name| Object::from(name.as_str())).collect::<Vec<_>>());
    let params = match stream.dict.get(b"DecodeParms") {
        Ok(Object::Dictionary(params)) => Some(params.clone()),
        Ok(Object::Array(items)) => items.first().and_then(|item| item.as_dict().ok()).cloned(),
        _ => None,
    };
    if let Some(params) = params {
        dict.set("DecodeParms", params);
    }

    Stream::new(dict, stream.content.clone())
        .decompressed_content()
        .map_err(|e| ImageError::StreamDecode(e.to_string()).into())
}

fn filter_object(names: &[String]) -> Option<Object> {
    match names {
        [] => None,
        [name] => Some(Object::from(name.as_str())),
        _ => Some(Object::Array(names.iter().map(|name| Object::from(name.as_str())).collect())),
    }
}

fn dimension(dict: &Dictionary, key: &[u8]) -> Result<u32> {
    let name = String::from_utf8_lossy(key);
    let value = dict
        .get(key)
        .and_then(Object::as_i64)
        .map_err(|_| ImageError::InvalidDictionary(format!("missing or non-numeric {}", name)))?;
    u32::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| ImageError::InvalidDictionary(format!("{} must be positive, got {}", name, value)).into())
}

/// Family name of a colour space: the name itself, or the first element of an array form
fn color_space_name(object: &Object) -> Option<String> {
    match object {
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        Object::Array(items) => items.first().and_then(color_space_name),
        _ => None,
    }
}

/// Colour table of `[/Indexed /DeviceRGB hival (table)]`
fn rgb_lookup(object: &Object) -> Option<Vec<u8>> {
    let Object::Array(items) = object else {
        return None;
    };
    match items.as_slice() {
        [Object::Name(family), Object::Name(base), _, Object::String(table, _)]
            if family.as_slice() == b"Indexed" && base.as_slice() == b"DeviceRGB" =>
        {
            Some(table.clone())
        }
        _ => None,
    }
}

/// True when `filter` is, or lists, the named filter
pub fn has_filter(filter: &Object, name: &str) -> bool {
    match filter {
        Object::Name(n) => n.as_slice() == name.as_bytes(),
        Object::Array(items) => items.iter().any(|item| has_filter(item, name)),
        _ => false,
    }
}
