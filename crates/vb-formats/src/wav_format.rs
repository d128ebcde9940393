//! WAV encoding and decoding for PCM audio.

use crate::FormatError;
use std::io::Write;
use vb_engine::Frame;

/// A decoded voice clip: interleaved stereo frames at the clip's own
/// sample rate. The message player resamples to the device rate.
#[derive(Clone, Debug, PartialEq)]
pub struct VoiceClip {
    pub sample_rate: u32,
    pub frames: Vec<Frame>,
}

impl VoiceClip {
    /// Clip duration in seconds.
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames.len() as f32 / self.sample_rate as f32
    }
}

// --- Writing ---

pub fn write_wav(w: &mut impl Write, frames: &[Frame], sample_rate: u32) -> std::io::Result<()> {
    let num_channels: u16 = 2;
    let bits_per_sample: u16 = 16;
    let block_align = num_channels * (bits_per_sample / 8);
    let data_size = frames.len() as u32 * block_align as u32;

    write_riff_header(w, data_size)?;
    write_fmt_chunk(w, num_channels, sample_rate, block_align, bits_per_sample)?;
    write_data_chunk(w, frames, data_size)
}

pub fn frames_to_wav(frames: &[Frame], sample_rate: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    write_wav(&mut buf, frames, sample_rate).expect("Vec<u8> write cannot fail");
    buf
}

fn write_riff_header(w: &mut impl Write, data_size: u32) -> std::io::Result<()> {
    w.write_all(b"RIFF")?;
    w.write_all(&(36 + data_size).to_le_bytes())?;
    w.write_all(b"WAVE")
}

fn write_fmt_chunk(
    w: &mut impl Write,
    num_channels: u16,
    sample_rate: u32,
    block_align: u16,
    bits_per_sample: u16,
) -> std::io::Result<()> {
    w.write_all(b"fmt ")?;
    w.write_all(&16u32.to_le_bytes())?;
    w.write_all(&1u16.to_le_bytes())?;
    w.write_all(&num_channels.to_le_bytes())?;
    w.write_all(&sample_rate.to_le_bytes())?;
    w.write_all(&(sample_rate * block_align as u32).to_le_bytes())?;
    w.write_all(&block_align.to_le_bytes())?;
    w.write_all(&bits_per_sample.to_le_bytes())
}

fn write_data_chunk(w: &mut impl Write, frames: &[Frame], data_size: u32) -> std::io::Result<()> {
    w.write_all(b"data")?;
    w.write_all(&data_size.to_le_bytes())?;
    for frame in frames {
        w.write_all(&frame.left.to_le_bytes())?;
        w.write_all(&frame.right.to_le_bytes())?;
    }
    Ok(())
}

// --- Reading ---

/// Load a WAV file from raw bytes into a stereo frame buffer.
pub fn load_wav(data: &[u8]) -> Result<VoiceClip, FormatError> {
    let header = parse_header(data)?;
    let frames = read_pcm_frames(data, &header)?;
    Ok(VoiceClip {
        sample_rate: header.sample_rate,
        frames,
    })
}

struct WavHeader {
    num_channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
    data_offset: usize,
    data_size: usize,
}

fn parse_header(data: &[u8]) -> Result<WavHeader, FormatError> {
    if data.len() < 44 {
        return Err(FormatError::UnexpectedEof);
    }
    if &data[0..4] != b"RIFF" || &data[8..12] != b"WAVE" {
        return Err(FormatError::InvalidHeader);
    }

    let mut pos = 12;
    let mut fmt: Option<(u16, u32, u16)> = None;
    let mut data_chunk: Option<(usize, usize)> = None;

    while pos + 8 <= data.len() {
        let chunk_id = &data[pos..pos + 4];
        let chunk_size = read_u32_le(data, pos + 4) as usize;

        if chunk_id == b"fmt " && chunk_size >= 16 {
            // The declared chunk size may lie; the reads below need 16
            // bytes of body to actually be present
            if pos + 24 > data.len() {
                return Err(FormatError::UnexpectedEof);
            }
            let format = read_u16_le(data, pos + 8);
            if format != 1 {
                return Err(FormatError::UnsupportedFormat);
            }
            let channels = read_u16_le(data, pos + 10);
            let rate = read_u32_le(data, pos + 12);
            let bits = read_u16_le(data, pos + 22);
            fmt = Some((channels, rate, bits));
        } else if chunk_id == b"data" {
            data_chunk = Some((pos + 8, chunk_size));
        }

        pos += 8 + chunk_size;
        if pos % 2 != 0 {
            pos += 1;
        }
    }

    let (num_channels, sample_rate, bits_per_sample) = fmt.ok_or(FormatError::InvalidHeader)?;
    let (data_offset, data_size) = data_chunk.ok_or(FormatError::InvalidHeader)?;

    if bits_per_sample != 8 && bits_per_sample != 16 {
        return Err(FormatError::UnsupportedFormat);
    }
    if !(1..=2).contains(&num_channels) {
        return Err(FormatError::UnsupportedFormat);
    }

    Ok(WavHeader {
        num_channels,
        sample_rate,
        bits_per_sample,
        data_offset,
        data_size,
    })
}

fn read_pcm_frames(data: &[u8], header: &WavHeader) -> Result<Vec<Frame>, FormatError> {
    let end = (header.data_offset + header.data_size).min(data.len());
    let raw = &data[header.data_offset..end];

    let frames = match (header.bits_per_sample, header.num_channels) {
        (8, 1) => raw.iter().map(|&b| Frame::mono(sample_from_u8(b))).collect(),
        (8, 2) => raw
            .chunks_exact(2)
            .map(|c| Frame {
                left: sample_from_u8(c[0]),
                right: sample_from_u8(c[1]),
            })
            .collect(),
        (16, 1) => raw
            .chunks_exact(2)
            .map(|c| Frame::mono(i16::from_le_bytes([c[0], c[1]])))
            .collect(),
        (16, 2) => raw
            .chunks_exact(4)
            .map(|c| Frame {
                left: i16::from_le_bytes([c[0], c[1]]),
                right: i16::from_le_bytes([c[2], c[3]]),
            })
            .collect(),
        _ => return Err(FormatError::UnsupportedFormat),
    };

    Ok(frames)
}

/// WAV 8-bit is unsigned with center 128; widen to signed 16-bit.
fn sample_from_u8(b: u8) -> i16 {
    ((b as i16) - 128) << 8
}

fn read_u16_le(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a minimal valid WAV file from raw parameters.
    fn make_wav(channels: u16, sample_rate: u32, bits: u16, pcm_data: &[u8]) -> Vec<u8> {
        let block_align = channels * (bits / 8);
        let byte_rate = sample_rate * block_align as u32;
        let data_size = pcm_data.len() as u32;

        let mut buf = Vec::new();
        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&(36 + data_size).to_le_bytes());
        buf.extend_from_slice(b"WAVE");
        buf.extend_from_slice(b"fmt ");
        buf.extend_from_slice(&16u32.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes());
        buf.extend_from_slice(&channels.to_le_bytes());
        buf.extend_from_slice(&sample_rate.to_le_bytes());
        buf.extend_from_slice(&byte_rate.to_le_bytes());
        buf.extend_from_slice(&block_align.to_le_bytes());
        buf.extend_from_slice(&bits.to_le_bytes());
        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&data_size.to_le_bytes());
        buf.extend_from_slice(pcm_data);
        buf
    }

    #[test]
    fn loads_16bit_stereo() {
        let pcm = [0x00, 0x40, 0x00, 0xC0]; // left 0x4000, right -0x4000
        let wav = make_wav(2, 8000, 16, &pcm);
        let clip = load_wav(&wav).unwrap();
        assert_eq!(clip.sample_rate, 8000);
        assert_eq!(clip.frames.len(), 1);
        assert_eq!(clip.frames[0].left, 0x4000);
        assert_eq!(clip.frames[0].right, -0x4000);
    }

    #[test]
    fn loads_16bit_mono_as_dual_channel() {
        let pcm = 1000i16.to_le_bytes();
        let wav = make_wav(1, 44100, 16, &pcm);
        let clip = load_wav(&wav).unwrap();
        assert_eq!(clip.frames, vec![Frame::mono(1000)]);
    }

    #[test]
    fn loads_8bit_mono_centered() {
        let wav = make_wav(1, 22050, 8, &[128, 255, 0]);
        let clip = load_wav(&wav).unwrap();
        assert_eq!(clip.frames[0], Frame::mono(0));
        assert!(clip.frames[1].left > 0);
        assert!(clip.frames[2].left < 0);
    }

    #[test]
    fn rejects_bad_magic() {
        let mut wav = make_wav(1, 44100, 16, &[0, 0]);
        wav[0] = b'X';
        assert!(matches!(load_wav(&wav), Err(FormatError::InvalidHeader)));
    }

    #[test]
    fn rejects_truncated_file() {
        assert!(matches!(
            load_wav(&[0u8; 10]),
            Err(FormatError::UnexpectedEof)
        ));
    }

    #[test]
    fn rejects_fmt_chunk_past_end_of_file() {
        // A junk chunk pads the file to the minimum length, then a fmt
        // chunk declares a 16-byte body the file does not contain
        let mut buf = Vec::new();
        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&36u32.to_le_bytes());
        buf.extend_from_slice(b"WAVE");
        buf.extend_from_slice(b"junk");
        buf.extend_from_slice(&16u32.to_le_bytes());
        buf.extend_from_slice(&[0u8; 16]);
        buf.extend_from_slice(b"fmt ");
        buf.extend_from_slice(&16u32.to_le_bytes());
        assert!(matches!(load_wav(&buf), Err(FormatError::UnexpectedEof)));
    }

    #[test]
    fn rejects_non_pcm_encoding() {
        let mut wav = make_wav(1, 44100, 16, &[0, 0]);
        // format tag lives at offset 20
        wav[20] = 3;
        assert!(matches!(
            load_wav(&wav),
            Err(FormatError::UnsupportedFormat)
        ));
    }

    #[test]
    fn written_wav_loads_back() {
        let frames = vec![Frame::mono(100), Frame::mono(-100), Frame::silence()];
        let bytes = frames_to_wav(&frames, 16000);
        let clip = load_wav(&bytes).unwrap();
        assert_eq!(clip.sample_rate, 16000);
        assert_eq!(clip.frames, frames);
    }

    #[test]
    fn duration_from_rate() {
        let clip = VoiceClip {
            sample_rate: 8000,
            frames: vec![Frame::silence(); 4000],
        };
        assert!((clip.duration_secs() - 0.5).abs() < 1e-6);
    }
}
