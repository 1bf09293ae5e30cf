//! Article data access.
//!
//! The data file is a gzip member. dictzip writes it with an extra-field
//! subfield (ID `RA`) holding a chunk table: the uncompressed stream is
//! cut into fixed-size chunks, each compressed so that inflation can
//! start at any chunk boundary. Fetching an article then only inflates
//! the chunks covering its `[offset, offset + size)` span. A data file
//! that is plain gzip without the table still works; it is inflated
//! whole into memory at open time.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::Mutex;

use flate2::read::GzDecoder;
use flate2::{Decompress, FlushDecompress, Status};

use crate::error::{DictdError, Result};

const GZ_MAGIC: [u8; 2] = [0x1f, 0x8b];
const CM_DEFLATE: u8 = 8;

const FHCRC: u8 = 0x02;
const FEXTRA: u8 = 0x04;
const FNAME: u8 = 0x08;
const FCOMMENT: u8 = 0x10;

/// Random-access view over one dictionary's compressed article data.
pub enum DataFile {
    /// dictzip member; chunks are inflated on demand.
    Dictzip(DzReader),
    /// Plain gzip member, buffered whole.
    Buffered(Vec<u8>),
}

impl DataFile {
    pub fn open(path: &Path) -> Result<Self> {
        let mut file = File::open(path)?;
        match DzHeader::parse(&mut file)? {
            Some(header) => Ok(DataFile::Dictzip(DzReader {
                file: Mutex::new(file),
                header,
            })),
            None => {
                file.seek(SeekFrom::Start(0))?;
                let mut buf = Vec::new();
                GzDecoder::new(file)
                    .read_to_end(&mut buf)
                    .map_err(|e| DictdError::Decompression(e.to_string()))?;
                Ok(DataFile::Buffered(buf))
            }
        }
    }

    /// Cheap check used during validation: does `path` start like gzip?
    pub fn probe(path: &Path) -> bool {
        let mut magic = [0u8; 2];
        File::open(path)
            .and_then(|mut f| f.read_exact(&mut magic))
            .map(|()| magic == GZ_MAGIC)
            .unwrap_or(false)
    }

    /// Decompressed bytes of the span `[offset, offset + size)`.
    pub fn fetch(&self, offset: u64, size: u64) -> Result<Vec<u8>> {
        match self {
            DataFile::Dictzip(dz) => dz.fetch(offset, size),
            DataFile::Buffered(buf) => {
                let start = usize::try_from(offset).ok();
                let end = start.and_then(|s| s.checked_add(size as usize));
                start
                    .zip(end)
                    .and_then(|(s, e)| buf.get(s..e))
                    .map(<[u8]>::to_vec)
                    .ok_or(DictdError::OutOfRange { offset, size })
            }
        }
    }
}

/// The parsed `RA` chunk table plus where the compressed chunks start.
struct DzHeader {
    chunk_len: u64,
    /// Absolute file offset of each chunk's first compressed byte.
    chunk_offsets: Vec<u64>,
    chunk_sizes: Vec<u16>,
}

impl DzHeader {
    /// Parse the gzip header. `Ok(None)` means a well-formed gzip member
    /// without a chunk table; errors mean not usable at all.
    fn parse(file: &mut File) -> Result<Option<Self>> {
        let mut fixed = [0u8; 10];
        file.read_exact(&mut fixed)?;
        if fixed[0..2] != GZ_MAGIC {
            return Err(DictdError::NotGzip("bad magic".to_string()));
        }
        if fixed[2] != CM_DEFLATE {
            return Err(DictdError::NotGzip(format!(
                "unsupported compression method {}",
                fixed[2]
            )));
        }
        let flags = fixed[3];

        if flags & FEXTRA == 0 {
            return Ok(None);
        }

        let mut xlen = [0u8; 2];
        file.read_exact(&mut xlen)?;
        let mut extra = vec![0u8; u16::from_le_bytes(xlen) as usize];
        file.read_exact(&mut extra)?;

        let Some(ra) = find_subfield(&extra, b"RA")? else {
            return Ok(None);
        };
        if ra.len() < 6 {
            return Err(DictdError::InvalidChunkTable(
                "subfield shorter than its fixed part".to_string(),
            ));
        }
        let version = u16::from_le_bytes([ra[0], ra[1]]);
        if version != 1 {
            return Err(DictdError::InvalidChunkTable(format!(
                "unsupported version {version}"
            )));
        }
        let chunk_len = u64::from(u16::from_le_bytes([ra[2], ra[3]]));
        if chunk_len == 0 {
            return Err(DictdError::InvalidChunkTable("zero chunk length".to_string()));
        }
        let chunk_count = u16::from_le_bytes([ra[4], ra[5]]) as usize;
        let table = &ra[6..];
        if table.len() < chunk_count * 2 {
            return Err(DictdError::InvalidChunkTable(format!(
                "table holds {} bytes for {chunk_count} chunks",
                table.len()
            )));
        }
        let chunk_sizes: Vec<u16> = table[..chunk_count * 2]
            .chunks_exact(2)
            .map(|b| u16::from_le_bytes([b[0], b[1]]))
            .collect();

        // Skip the remaining optional header fields to find the data.
        if flags & FNAME != 0 {
            skip_zero_terminated(file)?;
        }
        if flags & FCOMMENT != 0 {
            skip_zero_terminated(file)?;
        }
        if flags & FHCRC != 0 {
            file.seek(SeekFrom::Current(2))?;
        }

        let mut pos = file.stream_position()?;
        let mut chunk_offsets = Vec::with_capacity(chunk_sizes.len());
        for size in &chunk_sizes {
            chunk_offsets.push(pos);
            pos += u64::from(*size);
        }

        Ok(Some(Self {
            chunk_len,
            chunk_offsets,
            chunk_sizes,
        }))
    }
}

fn find_subfield<'a>(extra: &'a [u8], id: &[u8; 2]) -> Result<Option<&'a [u8]>> {
    let mut p = 0;
    while p + 4 <= extra.len() {
        let len = u16::from_le_bytes([extra[p + 2], extra[p + 3]]) as usize;
        let data = extra.get(p + 4..p + 4 + len).ok_or_else(|| {
            DictdError::InvalidChunkTable("subfield overruns the extra field".to_string())
        })?;
        if extra[p..p + 2] == id[..] {
            return Ok(Some(data));
        }
        p += 4 + len;
    }
    Ok(None)
}

fn skip_zero_terminated(file: &mut File) -> Result<()> {
    let mut byte = [0u8; 1];
    loop {
        file.read_exact(&mut byte)?;
        if byte[0] == 0 {
            return Ok(());
        }
    }
}

/// On-demand reader for a dictzip member.
pub struct DzReader {
    file: Mutex<File>,
    header: DzHeader,
}

impl DzReader {
    fn fetch(&self, offset: u64, size: u64) -> Result<Vec<u8>> {
        if size == 0 {
            return Ok(Vec::new());
        }
        let chunk_len = self.header.chunk_len;
        let first = (offset / chunk_len) as usize;
        let last = ((offset + size - 1) / chunk_len) as usize;
        if last >= self.header.chunk_offsets.len() {
            return Err(DictdError::OutOfRange { offset, size });
        }

        let mut inflated =
            Vec::with_capacity((last - first + 1) * chunk_len as usize);
        {
            let mut file = self.file.lock().map_err(|_| DictdError::LockPoisoned)?;
            let mut compressed = Vec::new();
            for i in first..=last {
                compressed.resize(usize::from(self.header.chunk_sizes[i]), 0);
                file.seek(SeekFrom::Start(self.header.chunk_offsets[i]))?;
                file.read_exact(&mut compressed)?;
                inflate_chunk(&compressed, chunk_len as usize, &mut inflated)?;
            }
        }

        let skip = (offset - first as u64 * chunk_len) as usize;
        let end = skip + size as usize;
        if end > inflated.len() {
            return Err(DictdError::OutOfRange { offset, size });
        }
        Ok(inflated[skip..end].to_vec())
    }
}

/// Inflate one chunk (raw deflate, at most `max_out` bytes) onto `out`.
///
/// dictzip chunks are flushed, not terminated, so inflation stops when
/// either the input is consumed or the expected size is reached; a
/// stream-end marker is accepted too.
fn inflate_chunk(input: &[u8], max_out: usize, out: &mut Vec<u8>) -> Result<()> {
    let start = out.len();
    out.resize(start + max_out, 0);

    let mut inflater = Decompress::new(false);
    let mut consumed = 0usize;
    let mut written = 0usize;
    loop {
        let before_in = inflater.total_in();
        let before_out = inflater.total_out();
        let status = inflater
            .decompress(
                &input[consumed..],
                &mut out[start + written..],
                FlushDecompress::None,
            )
            .map_err(|e| DictdError::Decompression(e.to_string()))?;
        consumed += (inflater.total_in() - before_in) as usize;
        written += (inflater.total_out() - before_out) as usize;

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                if consumed >= input.len() || written >= max_out {
                    break;
                }
                if inflater.total_in() == before_in && inflater.total_out() == before_out {
                    return Err(DictdError::Decompression(
                        "inflate made no progress".to_string(),
                    ));
                }
            }
        }
    }

    out.truncate(start + written);
    Ok(())
}
