use bitstream_io::{BigEndian, BitWrite, BitWriter};

use crate::process::MAX_HEADER_BYTES;

#[derive(Debug, Clone, Copy)]
pub enum ContentBits {
    Channel {
        channel_num_index: u8,
    },
    Objects {
        raw_objects: u8,
        object_bitrate_index: u8,
    },
    BedObjects {
        channel_num_index: u8,
        bed_bitrate_index: u8,
        raw_objects: u8,
        object_bitrate_index: u8,
    },
    Ambisonic {
        raw_order: u8,
    },
}

/// Raw field values for assembling a header bit pattern.
#[derive(Debug, Clone, Copy)]
pub struct HeaderBits {
    pub sync_word: u16,
    pub codec_id: u8,
    pub ancillary_data: bool,
    pub nn_type: u8,
    pub coding_profile: u8,
    pub sampling_rate_index: u8,
    pub crc: [u8; 2],
    pub soundbed_type: u8,
    pub content: ContentBits,
    pub resolution_index: u8,
    pub bitrate_index: u8,
}

impl HeaderBits {
    fn base(coding_profile: u8, content: ContentBits) -> Self {
        Self {
            sync_word: 0xFFF,
            codec_id: 2,
            ancillary_data: false,
            nn_type: 0,
            coding_profile,
            sampling_rate_index: 2,
            crc: [0, 0],
            soundbed_type: 0,
            content,
            resolution_index: 1,
            bitrate_index: 0,
        }
    }

    pub fn channel(channel_num_index: u8, bitrate_index: u8) -> Self {
        Self {
            bitrate_index,
            ..Self::base(0, ContentBits::Channel { channel_num_index })
        }
    }

    pub fn objects(raw_objects: u8, object_bitrate_index: u8) -> Self {
        Self::base(
            1,
            ContentBits::Objects {
                raw_objects,
                object_bitrate_index,
            },
        )
    }

    pub fn bed_objects(
        channel_num_index: u8,
        bed_bitrate_index: u8,
        raw_objects: u8,
        object_bitrate_index: u8,
    ) -> Self {
        Self {
            soundbed_type: 1,
            ..Self::base(
                1,
                ContentBits::BedObjects {
                    channel_num_index,
                    bed_bitrate_index,
                    raw_objects,
                    object_bitrate_index,
                },
            )
        }
    }

    pub fn ambisonic(raw_order: u8, bitrate_index: u8) -> Self {
        Self {
            bitrate_index,
            ..Self::base(2, ContentBits::Ambisonic { raw_order })
        }
    }

    /// Packs the fields into a zero-padded header window.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = BitWriter::endian(Vec::new(), BigEndian);
        self.write(&mut writer).expect("writing to a Vec cannot fail");
        writer
            .byte_align()
            .expect("writing to a Vec cannot fail");

        let mut bytes = writer.into_writer();
        if bytes.len() < MAX_HEADER_BYTES {
            bytes.resize(MAX_HEADER_BYTES, 0);
        }
        bytes
    }

    fn write<W: BitWrite>(&self, w: &mut W) -> std::io::Result<()> {
        w.write_var::<u16>(12, self.sync_word)?;
        w.write_var::<u8>(4, self.codec_id)?;
        w.write_bit(self.ancillary_data)?;
        w.write_var::<u8>(3, self.nn_type)?;
        w.write_var::<u8>(3, self.coding_profile)?;
        w.write_var::<u8>(4, self.sampling_rate_index)?;
        w.write_var::<u8>(8, self.crc[0])?;

        let trailing_bitrate_index = match self.content {
            ContentBits::Channel { channel_num_index } => {
                w.write_var::<u8>(7, channel_num_index)?;
                true
            }
            ContentBits::Objects {
                raw_objects,
                object_bitrate_index,
            } => {
                w.write_var::<u8>(2, self.soundbed_type)?;
                w.write_var::<u8>(7, raw_objects)?;
                w.write_var::<u8>(4, object_bitrate_index)?;
                true
            }
            ContentBits::BedObjects {
                channel_num_index,
                bed_bitrate_index,
                raw_objects,
                object_bitrate_index,
            } => {
                w.write_var::<u8>(2, self.soundbed_type)?;
                w.write_var::<u8>(7, channel_num_index)?;
                w.write_var::<u8>(4, bed_bitrate_index)?;
                w.write_var::<u8>(7, raw_objects)?;
                w.write_var::<u8>(4, object_bitrate_index)?;
                false
            }
            ContentBits::Ambisonic { raw_order } => {
                w.write_var::<u8>(4, raw_order)?;
                true
            }
        };

        w.write_var::<u8>(2, self.resolution_index)?;
        if trailing_bitrate_index {
            w.write_var::<u8>(4, self.bitrate_index)?;
        }
        w.write_var::<u8>(8, self.crc[1])?;

        Ok(())
    }
}
