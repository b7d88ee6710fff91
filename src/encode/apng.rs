use crate::foundation::core::FrameDelay;
use crate::foundation::error::{RenderError, RenderResult};
use crate::foundation::math::chunk_crc;

pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

const IHDR: [u8; 4] = *b"IHDR";
const IDAT: [u8; 4] = *b"IDAT";
const IEND: [u8; 4] = *b"IEND";
const ACTL: [u8; 4] = *b"acTL";
const FCTL: [u8; 4] = *b"fcTL";
const FDAT: [u8; 4] = *b"fdAT";

/// One chunk borrowed from a PNG byte stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub chunk_type: [u8; 4],
    pub data: &'a [u8],
    /// Length, type, data and CRC exactly as stored.
    pub raw: &'a [u8],
    /// Stored CRC (not verified).
    pub crc: u32,
}

/// Split a PNG into its chunks, stopping after `IEND`.
pub fn chunks(png: &[u8]) -> RenderResult<Vec<Chunk<'_>>> {
    let body = png
        .strip_prefix(&PNG_SIGNATURE)
        .ok_or_else(|| RenderError::malformed_frame("missing png signature"))?;

    let mut out = Vec::new();
    let mut pos = 0usize;
    while pos < body.len() {
        let header = body
            .get(pos..pos + 8)
            .ok_or_else(|| RenderError::malformed_frame("truncated chunk header"))?;
        let len = u32::from_be_bytes([header[0], header[1], header[2], header[3]]) as usize;
        let chunk_type = [header[4], header[5], header[6], header[7]];
        let end = pos + 8 + len + 4;
        let raw = body.get(pos..end).ok_or_else(|| {
            RenderError::malformed_frame(format!(
                "chunk {} runs past end of data",
                String::from_utf8_lossy(&chunk_type)
            ))
        })?;
        let data = &raw[8..8 + len];
        let crc_bytes = &raw[8 + len..];
        let crc = u32::from_be_bytes([crc_bytes[0], crc_bytes[1], crc_bytes[2], crc_bytes[3]]);
        out.push(Chunk {
            chunk_type,
            data,
            raw,
            crc,
        });
        pos = end;
        if chunk_type == IEND {
            break;
        }
    }
    Ok(out)
}

/// Stitch PNG frames into one APNG with the same delay on every frame.
///
/// A single frame is returned unchanged.
pub fn encode_frames(frames: &[Vec<u8>], delay: FrameDelay) -> RenderResult<Vec<u8>> {
    encode_animated(frames, |_| delay)
}

/// Stitch PNG frames into one looping APNG, asking `delay_for` for each frame's delay.
///
/// The first frame's `IHDR` and `IDAT` chunks are copied verbatim so the file still
/// decodes as that frame in viewers without APNG support. Later frames have their `IDAT`
/// payloads rewrapped as `fdAT`. Sequence numbers are shared by `fcTL` and `fdAT`.
pub fn encode_animated(
    frames: &[Vec<u8>],
    delay_for: impl Fn(usize) -> FrameDelay,
) -> RenderResult<Vec<u8>> {
    match frames {
        [] => return Err(RenderError::validation("no frames to encode")),
        [single] => return Ok(single.clone()),
        _ => {}
    }

    let parsed = frames
        .iter()
        .enumerate()
        .map(|(i, bytes)| {
            FrameChunks::parse(bytes).map_err(|e| match e {
                RenderError::MalformedFrame(msg) => {
                    RenderError::malformed_frame(format!("frame {i}: {msg}"))
                }
                other => other,
            })
        })
        .collect::<RenderResult<Vec<_>>>()?;

    let frame_count = u32::try_from(parsed.len())
        .map_err(|_| RenderError::validation("too many frames for one image"))?;

    let total: usize = frames.iter().map(Vec::len).sum();
    let mut out = Vec::with_capacity(total + 64 * parsed.len());
    out.extend_from_slice(&PNG_SIGNATURE);
    out.extend_from_slice(parsed[0].ihdr.raw);

    let mut actl = [0u8; 8];
    actl[..4].copy_from_slice(&frame_count.to_be_bytes());
    // Remaining four bytes: loop count 0, forever.
    write_chunk(&mut out, &ACTL, &actl);

    let mut sequence = 0u32;
    for (i, frame) in parsed.iter().enumerate() {
        let (width, height) = frame.size();
        let delay = delay_for(i);

        let mut fctl = [0u8; 26];
        fctl[0..4].copy_from_slice(&sequence.to_be_bytes());
        fctl[4..8].copy_from_slice(&width.to_be_bytes());
        fctl[8..12].copy_from_slice(&height.to_be_bytes());
        // x/y offsets stay zero.
        fctl[20..22].copy_from_slice(&delay.num.to_be_bytes());
        fctl[22..24].copy_from_slice(&delay.den.to_be_bytes());
        // dispose_op and blend_op stay zero.
        write_chunk(&mut out, &FCTL, &fctl);
        sequence += 1;

        if i == 0 {
            for idat in &frame.idat {
                out.extend_from_slice(idat.raw);
            }
            continue;
        }

        for idat in &frame.idat {
            let mut payload = Vec::with_capacity(4 + idat.data.len());
            payload.extend_from_slice(&sequence.to_be_bytes());
            payload.extend_from_slice(idat.data);
            write_chunk(&mut out, &FDAT, &payload);
            sequence += 1;
        }
    }

    write_chunk(&mut out, &IEND, &[]);
    tracing::debug!(frames = frame_count, bytes = out.len(), "assembled apng");
    Ok(out)
}

struct FrameChunks<'a> {
    ihdr: Chunk<'a>,
    idat: Vec<Chunk<'a>>,
}

impl<'a> FrameChunks<'a> {
    fn parse(png: &'a [u8]) -> RenderResult<Self> {
        let all = chunks(png)?;
        let ihdr = all
            .iter()
            .find(|c| c.chunk_type == IHDR)
            .copied()
            .ok_or_else(|| RenderError::malformed_frame("no IHDR chunk"))?;
        if ihdr.data.len() < 8 {
            return Err(RenderError::malformed_frame("IHDR chunk too short"));
        }
        let idat: Vec<Chunk<'a>> = all.into_iter().filter(|c| c.chunk_type == IDAT).collect();
        if idat.is_empty() {
            return Err(RenderError::malformed_frame("no IDAT chunk"));
        }
        Ok(Self { ihdr, idat })
    }

    fn size(&self) -> (u32, u32) {
        let d = self.ihdr.data;
        (
            u32::from_be_bytes([d[0], d[1], d[2], d[3]]),
            u32::from_be_bytes([d[4], d[5], d[6], d[7]]),
        )
    }
}

fn write_chunk(out: &mut Vec<u8>, chunk_type: &[u8; 4], payload: &[u8]) {
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(chunk_type);
    out.extend_from_slice(payload);
    out.extend_from_slice(&chunk_crc(chunk_type, payload).to_be_bytes());
}

#[cfg(test)]
#[path = "../../tests/unit/encode/apng.rs"]
mod tests;
