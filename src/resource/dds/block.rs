use std::ops::Range;

use crate::resource::dds::format::CompressionFormat;
use crate::resource::dds::DdsError;

/// Size in bytes of one block-compressed image, `None` if it does not fit in
/// `usize`.
pub fn compressed_size(width: u32, height: u32, block_bytes: usize) -> Option<usize> {
    (width.div_ceil(4) as usize)
        .checked_mul(height.div_ceil(4) as usize)?
        .checked_mul(block_bytes)
}

/// Number of levels until both dimensions reach 1.
pub fn full_mip_chain_length(width: u32, height: u32) -> u32 {
    u32::BITS - width.max(height).max(1).leading_zeros()
}

/// Size in bytes of a mip chain of `mip_level_count` levels starting at
/// `width` x `height`. Levels past the full chain are 1x1, one block each.
pub fn mip_chain_size(
    width: u32,
    height: u32,
    mip_level_count: u32,
    block_bytes: usize,
) -> Option<usize> {
    let real_level_count = mip_level_count.min(full_mip_chain_length(width, height));

    let real_levels_size = (0..real_level_count).try_fold(0_usize, |total, mip_level| {
        let level_width = (width >> mip_level).max(1);
        let level_height = (height >> mip_level).max(1);
        total.checked_add(compressed_size(level_width, level_height, block_bytes)?)
    })?;

    let extra_levels_size =
        ((mip_level_count - real_level_count) as usize).checked_mul(block_bytes)?;

    real_levels_size.checked_add(extra_levels_size)
}

/// One compressed image located inside the buffer it was decoded from.
///
/// Only the range is stored; [`DecodedBlock::bytes`] resolves it against the
/// same buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedBlock {
    pub range: Range<usize>,
    pub block_bytes: usize,
    pub width: u32,
    pub height: u32,
}

impl DecodedBlock {
    pub fn locate(
        data: &[u8],
        offset: usize,
        width: u32,
        height: u32,
        format: CompressionFormat,
    ) -> Result<Self, DdsError> {
        let block_bytes = format.block_bytes();
        let length = compressed_size(width, height, block_bytes)
            .ok_or(DdsError::InvalidDimensions { width, height })?;

        let end = match offset.checked_add(length) {
            Some(end) if end <= data.len() => end,
            _ => {
                return Err(DdsError::OutOfBounds {
                    offset,
                    length,
                    available: data.len(),
                })
            }
        };

        Ok(Self {
            range: offset..end,
            block_bytes,
            width,
            height,
        })
    }

    pub fn offset(&self) -> usize {
        self.range.start
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn bytes<'a>(&self, data: &'a [u8]) -> Result<&'a [u8], DdsError> {
        data.get(self.range.clone()).ok_or(DdsError::OutOfBounds {
            offset: self.range.start,
            length: self.range.len(),
            available: data.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_block_sizes() {
        assert_eq!(compressed_size(128, 128, 16), Some(16384));
        assert_eq!(compressed_size(128, 128, 8), Some(8192));
        assert_eq!(compressed_size(1, 1, 8), Some(8));
        assert_eq!(compressed_size(6, 2, 16), Some(32));
    }

    #[test]
    fn block_size_overflow_is_none() {
        assert_eq!(compressed_size(u32::MAX, u32::MAX, 16), None);
    }

    #[test]
    fn computes_mip_chain_size() {
        // 8x8 + 4x4 + 2x2 + 1x1 at 8 bytes per block
        assert_eq!(mip_chain_size(8, 8, 4, 8), Some(32 + 8 + 8 + 8));
        assert_eq!(mip_chain_size(128, 128, 1, 16), Some(16384));
        assert_eq!(mip_chain_size(8, 2, 4, 8), Some(16 + 8 + 8 + 8));
    }

    #[test]
    fn counts_full_mip_chain_length() {
        assert_eq!(full_mip_chain_length(1, 1), 1);
        assert_eq!(full_mip_chain_length(8, 8), 4);
        assert_eq!(full_mip_chain_length(256, 16), 9);
        assert_eq!(full_mip_chain_length(u32::MAX, 1), 32);
    }

    #[test]
    fn levels_past_full_chain_are_single_blocks() {
        assert_eq!(mip_chain_size(8, 8, 6, 8), Some(32 + 8 + 8 + 8 + 8 + 8));
        assert_eq!(
            mip_chain_size(8, 8, u32::MAX, 8),
            (u32::MAX as usize - 4)
                .checked_mul(8)
                .and_then(|extra| extra.checked_add(56))
        );
    }

    #[test]
    fn mip_chain_overflow_is_none() {
        assert_eq!(mip_chain_size(u32::MAX, u32::MAX, 2, 16), None);
    }

    #[test]
    fn locates_block_in_range() -> Result<(), DdsError> {
        let data = vec![7_u8; 128 + 16384];
        let block = DecodedBlock::locate(&data, 128, 128, 128, CompressionFormat::Dxt5)?;

        assert_eq!(block.offset(), 128);
        assert_eq!(block.len(), 16384);
        assert_eq!(block.block_bytes, 16);
        assert_eq!(block.bytes(&data)?.len(), 16384);

        Ok(())
    }

    #[test]
    fn rejects_block_past_end() {
        let data = vec![0_u8; 128 + 16383];

        assert_eq!(
            DecodedBlock::locate(&data, 128, 128, 128, CompressionFormat::Dxt5),
            Err(DdsError::OutOfBounds {
                offset: 128,
                length: 16384,
                available: 128 + 16383,
            })
        );
    }

    #[test]
    fn rejects_unaddressable_dimensions() {
        let data = vec![0_u8; 256];

        assert_eq!(
            DecodedBlock::locate(&data, 128, u32::MAX, u32::MAX, CompressionFormat::Dxt5),
            Err(DdsError::InvalidDimensions {
                width: u32::MAX,
                height: u32::MAX,
            })
        );
    }

    #[test]
    fn rejects_overflowing_offset() {
        let data = vec![0_u8; 256];

        assert!(DecodedBlock::locate(&data, usize::MAX, 4, 4, CompressionFormat::Dxt1).is_err());
    }
}
