use thiserror::Error;

use crate::Rect;

/// Size of one encoded rect: four little-endian `i32`s.
pub const RECORD_LEN: usize = 16;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("save data ends mid-record: {records} whole records then {trailing} stray bytes")]
    Truncated { records: usize, trailing: usize },
}

/// Byte format of the save file. The store only talks to this trait, so a
/// versioned format can replace [`RecordCodec`] without touching anything else.
pub trait SceneCodec {
    fn encode(&self, rects: &[Rect]) -> Vec<u8>;
    fn decode(&self, bytes: &[u8]) -> Result<Vec<Rect>, CodecError>;
}

/// Headerless `x, y, w, h` records back to back. The record count is the
/// byte length divided by [`RECORD_LEN`].
#[derive(Debug, Default, Clone, Copy)]
pub struct RecordCodec;

impl SceneCodec for RecordCodec {
    fn encode(&self, rects: &[Rect]) -> Vec<u8> {
        let mut out = Vec::with_capacity(rects.len() * RECORD_LEN);
        for r in rects {
            for v in [r.x, r.y, r.w, r.h] {
                out.extend_from_slice(&v.to_le_bytes());
            }
        }
        out
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Rect>, CodecError> {
        let chunks = bytes.chunks_exact(RECORD_LEN);
        let trailing = chunks.remainder().len();
        if trailing != 0 {
            return Err(CodecError::Truncated {
                records: bytes.len() / RECORD_LEN,
                trailing,
            });
        }

        Ok(chunks.map(decode_record).collect())
    }
}

fn decode_record(record: &[u8]) -> Rect {
    let field = |i: usize| {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(&record[i * 4..i * 4 + 4]);
        i32::from_le_bytes(buf)
    };
    Rect::new(field(0), field(1), field(2), field(3))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Scene;

    #[test]
    fn record_layout_is_little_endian_xywh() {
        let bytes = RecordCodec.encode(&[Rect::new(1, -2, 0x0102_0304, 50)]);
        assert_eq!(bytes.len(), RECORD_LEN);
        assert_eq!(&bytes[0..4], &[1, 0, 0, 0]);
        assert_eq!(&bytes[4..8], &[0xfe, 0xff, 0xff, 0xff]);
        assert_eq!(&bytes[8..12], &[4, 3, 2, 1]);
        assert_eq!(&bytes[12..16], &[50, 0, 0, 0]);
    }

    #[test]
    fn default_layout_survives_encode_decode() {
        let scene = Scene::default_layout();
        let bytes = RecordCodec.encode(scene.rects());
        assert_eq!(bytes.len(), scene.len() * RECORD_LEN);

        let decoded = RecordCodec.decode(&bytes).expect("well-formed");
        assert_eq!(decoded, scene.rects());
    }

    #[test]
    fn extreme_values_survive_encode_decode() {
        let rects = vec![
            Rect::new(i32::MIN, i32::MAX, -1, 0),
            Rect::new(-150, 0, 75, 50),
        ];
        let decoded = RecordCodec.decode(&RecordCodec.encode(&rects)).expect("well-formed");
        assert_eq!(decoded, rects);
    }

    #[test]
    fn empty_input_decodes_to_no_rects() {
        assert_eq!(RecordCodec.decode(&[]), Ok(vec![]));
    }

    #[test]
    fn trailing_partial_record_is_rejected() {
        let mut bytes = RecordCodec.encode(&[Rect::new(1, 2, 3, 4), Rect::new(5, 6, 7, 8)]);
        bytes.extend_from_slice(&[9, 0, 0, 0, 10]);

        let err = RecordCodec.decode(&bytes).unwrap_err();
        assert_eq!(err, CodecError::Truncated { records: 2, trailing: 5 });
    }

    #[test]
    fn short_file_yields_no_synthetic_rect() {
        let err = RecordCodec.decode(&[0u8; 7]).unwrap_err();
        assert_eq!(err, CodecError::Truncated { records: 0, trailing: 7 });
    }
}
