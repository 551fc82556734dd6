// Write acknowledgement body: frame numbers, statuses and revision metadata

use crate::bitwise::read_u16_be;
use crate::core::constants::{frame_status_text, ResourceFamily};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    #[error("Invalid write response length {0}: expected 4, 7 or an odd length above 7")]
    InvalidLength(usize),

    #[error("Unknown write response status {status} for frame {frame_number}")]
    UnknownStatus { frame_number: u8, status: u8 },
}

pub type Result<T> = std::result::Result<T, FrameError>;

/// One (frame number, status) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub frame_number: u8,
    pub status: String,
}

/// Decoded write acknowledgement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameData {
    pub frames: Vec<Frame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision_counter: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_wrong_frames: Option<u8>,
}

const FIRST_FRAME: usize = 2;
const SINGLE_FRAME_LEN: usize = 4;
const REVISION_LEN: usize = 7;

/// Decode one frame from its counter byte and status byte
///
/// The frame number sits in bits 6..2 of the counter byte.
fn decode_frame(family: ResourceFamily, counter: u8, status: u8) -> Result<Frame> {
    let frame_number = (counter >> 2) & 0x1F;
    let status = frame_status_text(family, status).ok_or(FrameError::UnknownStatus {
        frame_number,
        status,
    })?;
    Ok(Frame {
        frame_number,
        status,
    })
}

/// Decode the write acknowledgement carried by a whole message (header included)
pub fn decode_frames(family: ResourceFamily, data: &[u8]) -> Result<FrameData> {
    let len = data.len();
    let valid = len == SINGLE_FRAME_LEN
        || len == REVISION_LEN
        || (len > REVISION_LEN && len % 2 == 1);
    if !valid {
        return Err(FrameError::InvalidLength(len));
    }

    let mut frames = vec![decode_frame(
        family,
        data[FIRST_FRAME],
        data[FIRST_FRAME + 1],
    )?];

    if len == SINGLE_FRAME_LEN {
        return Ok(FrameData {
            frames,
            revision_counter: None,
            total_wrong_frames: None,
        });
    }

    let revision_counter = read_u16_be(&data[4..6]).map_err(|_| FrameError::InvalidLength(len))?;
    let total_wrong_frames = data[6];

    for pair in data[REVISION_LEN..].chunks_exact(2) {
        frames.push(decode_frame(family, pair[0], pair[1])?);
    }

    tracing::debug!(
        "Write response: {} frames, revision {}, {} wrong frames",
        frames.len(),
        revision_counter,
        total_wrong_frames
    );

    Ok(FrameData {
        frames,
        revision_counter: Some(revision_counter),
        total_wrong_frames: Some(total_wrong_frames),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CONFIG: ResourceFamily = ResourceFamily::Configuration;

    #[test]
    fn test_revision_example() {
        let data = [0x15, 0x03, 0x00, 0x01, 0x00, 0x04, 0x00];
        let decoded = decode_frames(CONFIG, &data).unwrap();
        assert_eq!(
            decoded,
            FrameData {
                frames: vec![Frame {
                    frame_number: 0,
                    status: "Configuration received and applied with success".to_string()
                }],
                revision_counter: Some(4),
                total_wrong_frames: Some(0),
            }
        );
        assert_eq!(
            serde_json::to_value(&decoded).unwrap(),
            json!({
                "frames": [{
                    "frameNumber": 0,
                    "status": "Configuration received and applied with success"
                }],
                "revisionCounter": 4,
                "totalWrongFrames": 0
            })
        );
    }

    #[test]
    fn test_single_frame() {
        // frame 5 -> 0b0001_0100
        let decoded =
            decode_frames(ResourceFamily::Identification, &[0x14, 0x03, 0x14, 0x00]).unwrap();
        assert_eq!(decoded.frames.len(), 1);
        assert_eq!(decoded.frames[0].frame_number, 5);
        assert_eq!(decoded.frames[0].status, "Identification received but not applied");
        assert!(decoded.revision_counter.is_none());
        assert!(decoded.total_wrong_frames.is_none());
        assert_eq!(
            serde_json::to_value(&decoded).unwrap(),
            json!({
                "frames": [{"frameNumber": 5, "status": "Identification received but not applied"}]
            })
        );
    }

    #[test]
    fn test_frame_number_bits() {
        // bit 7 and bits 1..0 are not part of the counter
        let decoded = decode_frames(CONFIG, &[0x15, 0x03, 0xFF, 0x01]).unwrap();
        assert_eq!(decoded.frames[0].frame_number, 31);
    }

    #[test]
    fn test_length_boundaries() {
        for len in [0usize, 1, 2, 3, 5, 6, 8, 10, 12] {
            let mut data = vec![0x15, 0x03];
            data.resize(len.max(2), 0x01);
            data.truncate(len);
            assert_eq!(
                decode_frames(CONFIG, &data),
                Err(FrameError::InvalidLength(len)),
                "length {}",
                len
            );
        }
    }

    #[test]
    fn test_extra_frames() {
        let mut data = vec![0x15, 0x03, 0x00, 0x01, 0x00, 0x02, 0x01];
        for len in [9usize, 11, 13] {
            while data.len() < len {
                let frame = ((data.len() - 7) / 2 + 1) as u8;
                data.extend_from_slice(&[frame << 2, 0x07]);
            }
            let decoded = decode_frames(CONFIG, &data).unwrap();
            assert_eq!(decoded.frames.len(), 1 + (len - 7) / 2);
            for (i, frame) in decoded.frames.iter().enumerate().skip(1) {
                assert_eq!(frame.frame_number as usize, i);
                assert_eq!(frame.status, "Frame rejected - missing frame");
            }
            assert_eq!(decoded.revision_counter, Some(2));
            assert_eq!(decoded.total_wrong_frames, Some(1));
        }
    }

    #[test]
    fn test_unknown_status() {
        assert_eq!(
            decode_frames(CONFIG, &[0x15, 0x03, 0x08, 0x09]),
            Err(FrameError::UnknownStatus {
                frame_number: 2,
                status: 9
            })
        );
        let mut data = vec![0x15, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00, 0x04, 0x20];
        assert!(decode_frames(CONFIG, &data).is_err());
        data[8] = 0x08;
        assert!(decode_frames(CONFIG, &data).is_ok());
    }
}
