//! Audio Vivid frame header.
//!
//! ## Layout
//!
//! Every coded frame starts with a bit-packed header of at most 9 bytes:
//!
//! | bits | field                                   |
//! |------|-----------------------------------------|
//! | 12   | sync word (0xFFF)                       |
//! | 4    | codec id (2)                            |
//! | 1    | ancillary data flag (0)                 |
//! | 3    | nn_type                                 |
//! | 3    | coding_profile                          |
//! | 4    | sampling_rate_index                     |
//! | 8    | CRC, first part                         |
//! | var  | content fields, selected by the profile |
//! | 2    | resolution_index                        |
//! | 4    | bitrate_index, absent for bed + objects |
//! | 8    | CRC, second part                        |
//!
//! ## Content Types
//!
//! - **Channel** (profile 0): a speaker configuration.
//! - **Objects** (profile 1, soundbed type 0): discrete objects only.
//! - **Channel + Objects** (profile 1, soundbed type 1): a multichannel bed
//!   with objects on top.
//! - **Ambisonic** (profile 2): HOA of order 1 to 3.
//!
//! The CRC bytes are skipped, not validated.

use std::fmt::Display;

use log::trace;

use crate::process::{CODEC_ID, FRAME_LENGTH, SYNC_WORD, payload_size};
use crate::structs::tables::{ChannelConfig, ChannelLayout, sampling_rate};
use crate::utils::bitstream_io::BitCursor;
use crate::utils::errors::{HeaderError, PayloadError};

/// Bits occupied by each CRC half.
const CRC_PART_BITS: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodingProfile {
    Channel = 0,
    ObjectMixed = 1,
    Ambisonic = 2,
}

impl CodingProfile {
    fn from_bits(value: u8) -> Result<Self, HeaderError> {
        match value {
            0 => Ok(CodingProfile::Channel),
            1 => Ok(CodingProfile::ObjectMixed),
            2 => Ok(CodingProfile::Ambisonic),
            _ => Err(HeaderError::InvalidCodingProfile(value)),
        }
    }
}

/// Normalized content classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    ChannelOnly = 0,
    ObjectOnly = 1,
    ChannelObject = 2,
    Ambisonic = 3,
}

impl Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentType::ChannelOnly => write!(f, "Channel"),
            ContentType::ObjectOnly => write!(f, "Objects"),
            ContentType::ChannelObject => write!(f, "Channel bed + objects"),
            ContentType::Ambisonic => write!(f, "Ambisonic"),
        }
    }
}

/// Branch-specific content description. Each variant owns every field its
/// branch decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content {
    Channel {
        config: ChannelConfig,
    },
    Objects {
        count: u16,
        object_bitrate: u64,
    },
    ChannelObjects {
        bed: ChannelConfig,
        bed_bitrate: u64,
        objects: u16,
        object_bitrate: u64,
    },
    Ambisonic {
        order: HoaOrder,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoaOrder {
    First = 1,
    Second = 2,
    Third = 3,
}

impl HoaOrder {
    fn from_order(order: u8) -> Result<Self, HeaderError> {
        match order {
            1 => Ok(HoaOrder::First),
            2 => Ok(HoaOrder::Second),
            3 => Ok(HoaOrder::Third),
            _ => Err(HeaderError::InvalidHoaOrder(order)),
        }
    }

    pub const fn order(self) -> u8 {
        self as u8
    }

    pub const fn config(self) -> ChannelConfig {
        match self {
            HoaOrder::First => ChannelConfig::HoaOrder1,
            HoaOrder::Second => ChannelConfig::HoaOrder2,
            HoaOrder::Third => ChannelConfig::HoaOrder3,
        }
    }

    /// `(order + 1)^2` ambisonic channels.
    pub const fn channels(self) -> u16 {
        self.config().channels()
    }
}

/// Packed sample format a decoder should output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    U8,
    S16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Bits8 = 0,
    Bits16 = 1,
    Bits24 = 2,
}

impl Resolution {
    fn from_index(index: u8) -> Result<Self, HeaderError> {
        match index {
            0 => Ok(Resolution::Bits8),
            1 => Ok(Resolution::Bits16),
            2 => Ok(Resolution::Bits24),
            _ => Err(HeaderError::InvalidResolutionIndex(index)),
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn bits(self) -> u8 {
        match self {
            Resolution::Bits8 => 8,
            Resolution::Bits16 => 16,
            Resolution::Bits24 => 24,
        }
    }

    /// 24-bit output has no packed sample format.
    pub const fn sample_format(self) -> Option<SampleFormat> {
        match self {
            Resolution::Bits8 => Some(SampleFormat::U8),
            Resolution::Bits16 => Some(SampleFormat::S16),
            Resolution::Bits24 => None,
        }
    }
}

/// Decoded frame header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub codec_id: u8,
    pub nn_type: u8,
    pub coding_profile: CodingProfile,
    pub sampling_rate_index: u8,
    pub sampling_rate: u32,
    pub content: Content,
    pub resolution: Resolution,
    pub total_bitrate: u64,
    /// Bits consumed from the start of the sync word through the second CRC part.
    pub header_bits: u64,
}

impl HeaderInfo {
    /// Decodes a header from the start of `buf`.
    ///
    /// Only the bits the selected branch needs are read; trailing bytes of
    /// the window are ignored.
    ///
    /// ```rust
    /// use av3a::process::EXAMPLE_HEADER;
    /// use av3a::structs::header::HeaderInfo;
    ///
    /// let header = HeaderInfo::from_bytes(&EXAMPLE_HEADER)?;
    /// assert_eq!(header.sampling_rate, 48000);
    /// assert_eq!(header.total_channels(), 2);
    /// assert_eq!(header.total_bitrate, 64000);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_bytes(buf: &[u8]) -> Result<Self, HeaderError> {
        let reader = &mut BitCursor::from_slice(buf);
        Self::read(reader)
    }

    pub fn read(reader: &mut BitCursor) -> Result<Self, HeaderError> {
        let start_pos = reader.position()?;

        let sync_word: u16 = reader.get_n(12)?;
        if sync_word != SYNC_WORD {
            return Err(HeaderError::InvalidSyncWord(sync_word));
        }

        let codec_id: u8 = reader.get_n(4)?;
        if codec_id != CODEC_ID {
            return Err(HeaderError::UnsupportedCodec(codec_id));
        }

        if reader.get()? {
            return Err(HeaderError::UnsupportedAncillaryData);
        }

        let nn_type = reader.get_n(3)?;
        let coding_profile = reader.get_n(3)?;
        let sampling_rate_index = reader.get_n(4)?;
        let sampling_rate = sampling_rate(sampling_rate_index)?;

        reader.skip_n(CRC_PART_BITS)?;

        let coding_profile = CodingProfile::from_bits(coding_profile)?;
        let content = Self::read_content(coding_profile, reader)?;

        let resolution = Resolution::from_index(reader.get_n(2)?)?;

        let total_bitrate = match content {
            Content::Channel { config } => config.bitrate(reader.get_n(4)?)?,
            Content::Ambisonic { order } => order.config().bitrate(reader.get_n(4)?)?,
            Content::Objects {
                count,
                object_bitrate,
            } => {
                // Objects-only frames carry the trailing bitrate index too.
                reader.get_n::<u8>(4)?;
                object_bitrate * count as u64
            }
            Content::ChannelObjects {
                bed_bitrate,
                objects,
                object_bitrate,
                ..
            } => bed_bitrate + object_bitrate * objects as u64,
        };

        reader.skip_n(CRC_PART_BITS)?;

        let header = Self {
            codec_id,
            nn_type,
            coding_profile,
            sampling_rate_index,
            sampling_rate,
            content,
            resolution,
            total_bitrate,
            header_bits: reader.position()? - start_pos,
        };

        trace!("{header:?}");

        Ok(header)
    }

    fn read_content(profile: CodingProfile, reader: &mut BitCursor) -> Result<Content, HeaderError> {
        match profile {
            CodingProfile::Channel => {
                let index: u8 = reader.get_n(7)?;
                let config = ChannelConfig::from_index(index)
                    .filter(|config| !config.is_ambisonic())
                    .ok_or(HeaderError::InvalidChannelConfig {
                        index,
                        context: "channel content",
                    })?;

                Ok(Content::Channel { config })
            }
            CodingProfile::ObjectMixed => {
                let soundbed_type: u8 = reader.get_n(2)?;
                match soundbed_type {
                    0 => {
                        let count = reader.get_n::<u16>(7)? + 1;
                        let object_bitrate = ChannelConfig::Mono.bitrate(reader.get_n(4)?)?;

                        Ok(Content::Objects {
                            count,
                            object_bitrate,
                        })
                    }
                    1 => {
                        let index: u8 = reader.get_n(7)?;
                        let bed_bitrate_index: u8 = reader.get_n(4)?;
                        let objects = reader.get_n::<u16>(7)? + 1;
                        let object_bitrate_index: u8 = reader.get_n(4)?;

                        let bed = ChannelConfig::from_index(index)
                            .filter(|config| config.bed_name().is_some())
                            .ok_or(HeaderError::InvalidChannelConfig {
                                index,
                                context: "soundbed",
                            })?;

                        Ok(Content::ChannelObjects {
                            bed,
                            bed_bitrate: bed.bitrate(bed_bitrate_index)?,
                            objects,
                            object_bitrate: ChannelConfig::Mono.bitrate(object_bitrate_index)?,
                        })
                    }
                    _ => Err(HeaderError::InvalidSoundbedType(soundbed_type)),
                }
            }
            CodingProfile::Ambisonic => {
                let order = reader.get_n::<u8>(4)? + 1;

                Ok(Content::Ambisonic {
                    order: HoaOrder::from_order(order)?,
                })
            }
        }
    }

    pub fn content_type(&self) -> ContentType {
        match self.content {
            Content::Channel { .. } => ContentType::ChannelOnly,
            Content::Objects { .. } => ContentType::ObjectOnly,
            Content::ChannelObjects { .. } => ContentType::ChannelObject,
            Content::Ambisonic { .. } => ContentType::Ambisonic,
        }
    }

    /// Channel configuration whose table resolved the bitrate, if any.
    pub fn channel_config(&self) -> Option<ChannelConfig> {
        match self.content {
            Content::Channel { config } => Some(config),
            Content::ChannelObjects { bed, .. } => Some(bed),
            Content::Ambisonic { order } => Some(order.config()),
            Content::Objects { .. } => None,
        }
    }

    /// Raw `channel_num_index`, present for channel and bed content.
    pub fn channel_num_index(&self) -> Option<u8> {
        match self.content {
            Content::Channel { config } => Some(config.index()),
            Content::ChannelObjects { bed, .. } => Some(bed.index()),
            _ => None,
        }
    }

    pub fn channels(&self) -> u16 {
        match self.content {
            Content::Channel { config } => config.channels(),
            Content::ChannelObjects { bed, .. } => bed.channels(),
            Content::Ambisonic { order } => order.channels(),
            Content::Objects { .. } => 0,
        }
    }

    pub fn objects(&self) -> u16 {
        match self.content {
            Content::Objects { count, .. } => count,
            Content::ChannelObjects { objects, .. } => objects,
            _ => 0,
        }
    }

    pub fn hoa_order(&self) -> Option<u8> {
        match self.content {
            Content::Ambisonic { order } => Some(order.order()),
            _ => None,
        }
    }

    /// Number of coded signals: speaker channels plus objects.
    pub fn total_channels(&self) -> u16 {
        self.channels() + self.objects()
    }

    /// Standard speaker layout, set only for channel content that maps to one.
    pub fn channel_layout(&self) -> Option<ChannelLayout> {
        match self.content {
            Content::Channel { config } => config.layout(),
            _ => None,
        }
    }

    pub fn bitdepth(&self) -> u8 {
        self.resolution.bits()
    }

    /// Size in bytes of the coded frame this header starts.
    pub fn payload_size(&self) -> Result<usize, PayloadError> {
        payload_size(self.total_bitrate, self.sampling_rate, FRAME_LENGTH)
    }

    /// Header bytes, rounded up to a whole byte.
    pub fn header_len(&self) -> usize {
        self.header_bits.div_ceil(8) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::EXAMPLE_HEADER;
    use crate::structs::tables::{BITRATE_TABLE_MONO, SAMPLING_RATE_TABLE};
    use crate::utils::test_util::HeaderBits;

    fn decode(bits: HeaderBits) -> Result<HeaderInfo, HeaderError> {
        HeaderInfo::from_bytes(&bits.to_bytes())
    }

    #[test]
    fn example_header_decodes() {
        let header = HeaderInfo::from_bytes(&EXAMPLE_HEADER).unwrap();

        assert_eq!(header.codec_id, 2);
        assert_eq!(header.sampling_rate_index, 2);
        assert_eq!(header.sampling_rate, 48000);
        assert_eq!(header.coding_profile, CodingProfile::Channel);
        assert_eq!(header.content_type(), ContentType::ChannelOnly);
        assert_eq!(header.channel_num_index(), Some(1));
        assert_eq!(header.channels(), 2);
        assert_eq!(header.objects(), 0);
        assert_eq!(header.total_channels(), 2);
        assert_eq!(header.channel_layout(), Some(ChannelLayout::Stereo));
        assert_eq!(header.resolution, Resolution::Bits16);
        assert_eq!(header.bitdepth(), 16);
        assert_eq!(header.resolution.sample_format(), Some(SampleFormat::S16));
        assert_eq!(header.total_bitrate, 64000);
        assert_eq!(header.header_bits, 56);
        assert_eq!(header.header_len(), 7);
    }

    #[test]
    fn builder_matches_example_header() {
        let bits = HeaderBits::channel(ChannelConfig::Stereo.index(), 3);
        assert_eq!(bits.to_bytes(), EXAMPLE_HEADER);
    }

    #[test]
    fn every_sampling_rate_index() {
        for (index, &rate) in SAMPLING_RATE_TABLE.iter().enumerate() {
            let header = decode(HeaderBits {
                sampling_rate_index: index as u8,
                ..HeaderBits::channel(0, 0)
            })
            .unwrap();
            assert_eq!(header.sampling_rate, rate);
        }

        for index in 9..=15 {
            let err = decode(HeaderBits {
                sampling_rate_index: index,
                ..HeaderBits::channel(0, 0)
            })
            .unwrap_err();
            assert!(matches!(err, HeaderError::InvalidSamplingRateIndex(i) if i == index));
        }
    }

    #[test]
    fn mono_channel_content() {
        let header = decode(HeaderBits::channel(ChannelConfig::Mono.index(), 4)).unwrap();

        assert_eq!(header.channels(), 1);
        assert_eq!(header.total_channels(), 1);
        assert_eq!(header.objects(), 0);
        assert_eq!(header.hoa_order(), None);
        assert_eq!(header.channel_layout(), Some(ChannelLayout::Mono));
        assert_eq!(header.total_bitrate, 64000);
    }

    #[test]
    fn multichannel_layouts() {
        let cases = [
            (ChannelConfig::Mc5_1, 6, Some(ChannelLayout::FivePointOne), 384000),
            (ChannelConfig::Mc7_1, 8, Some(ChannelLayout::SevenPointOne), 384000),
            (ChannelConfig::Mc4_0, 4, None, 192000),
            (ChannelConfig::Mc5_1_2, 8, None, 576000),
            (ChannelConfig::Mc5_1_4, 10, None, 704000),
            (ChannelConfig::Mc7_1_2, 10, None, 384000),
            (ChannelConfig::Mc7_1_4, 12, None, 512000),
        ];

        for (config, channels, layout, bitrate) in cases {
            let header = decode(HeaderBits::channel(config.index(), 3)).unwrap();
            assert_eq!(header.channels(), channels, "{config}");
            assert_eq!(header.total_channels(), channels, "{config}");
            assert_eq!(header.channel_layout(), layout, "{config}");
            assert_eq!(header.total_bitrate, bitrate, "{config}");
        }
    }

    #[test]
    fn configs_without_bitrates_are_rejected() {
        for config in [ChannelConfig::Mc10_2, ChannelConfig::Mc22_2] {
            let err = decode(HeaderBits::channel(config.index(), 0)).unwrap_err();
            assert!(matches!(err, HeaderError::InvalidBitrateIndex { index: 0, .. }));
        }
    }

    #[test]
    fn unknown_channel_config_is_rejected() {
        for index in [11, 13, 14, 127] {
            let err = decode(HeaderBits::channel(index, 0)).unwrap_err();
            assert!(matches!(
                err,
                HeaderError::InvalidChannelConfig { index: i, .. } if i == index
            ));
        }
    }

    #[test]
    fn objects_only_content() {
        let header = decode(HeaderBits::objects(3, 2)).unwrap();

        assert_eq!(header.coding_profile, CodingProfile::ObjectMixed);
        assert_eq!(header.content_type(), ContentType::ObjectOnly);
        assert_eq!(header.objects(), 4);
        assert_eq!(header.channels(), 0);
        assert_eq!(header.total_channels(), 4);
        assert_eq!(header.channel_num_index(), None);
        assert_eq!(header.channel_layout(), None);
        assert_eq!(header.total_bitrate, BITRATE_TABLE_MONO[2] * 4);
        assert_eq!(header.header_bits, 62);
    }

    #[test]
    fn objects_only_maximum_count() {
        let header = decode(HeaderBits::objects(127, 0)).unwrap();
        assert_eq!(header.objects(), 128);
        assert_eq!(header.total_bitrate, 16000 * 128);
    }

    #[test]
    fn objects_with_undefined_bitrate_are_rejected() {
        let err = decode(HeaderBits::objects(0, 12)).unwrap_err();
        assert!(matches!(err, HeaderError::InvalidBitrateIndex { index: 12, .. }));
    }

    #[test]
    fn bed_plus_objects_content() {
        let header = decode(HeaderBits::bed_objects(ChannelConfig::Mc5_1.index(), 1, 1, 4)).unwrap();

        assert_eq!(header.content_type(), ContentType::ChannelObject);
        assert_eq!(header.channel_num_index(), Some(2));
        assert_eq!(header.channels(), 6);
        assert_eq!(header.objects(), 2);
        assert_eq!(header.total_channels(), 8);
        assert_eq!(header.channel_layout(), None);
        assert_eq!(header.total_bitrate, 256000 + 64000 * 2);
        assert_eq!(header.header_bits, 69);
        assert_eq!(header.header_len(), 9);

        let Content::ChannelObjects {
            bed,
            bed_bitrate,
            object_bitrate,
            ..
        } = header.content
        else {
            panic!("unexpected content {:?}", header.content);
        };
        assert_eq!(bed, ChannelConfig::Mc5_1);
        assert_eq!(bed_bitrate, 256000);
        assert_eq!(object_bitrate, 64000);
    }

    #[test]
    fn bed_must_be_a_multichannel_bed() {
        for index in [ChannelConfig::Mono.index(), ChannelConfig::HoaOrder1.index(), 20] {
            let err = decode(HeaderBits::bed_objects(index, 0, 0, 0)).unwrap_err();
            assert!(matches!(
                err,
                HeaderError::InvalidChannelConfig { index: i, .. } if i == index
            ));
        }
    }

    #[test]
    fn bed_sentinel_bitrate_is_rejected() {
        let err = decode(HeaderBits::bed_objects(ChannelConfig::Mc5_1_2.index(), 4, 0, 0))
            .unwrap_err();
        assert!(matches!(err, HeaderError::InvalidBitrateIndex { index: 4, .. }));
    }

    #[test]
    fn invalid_soundbed_type() {
        for soundbed_type in [2, 3] {
            let err = decode(HeaderBits {
                soundbed_type,
                ..HeaderBits::objects(0, 0)
            })
            .unwrap_err();
            assert!(matches!(err, HeaderError::InvalidSoundbedType(t) if t == soundbed_type));
        }
    }

    #[test]
    fn ambisonic_orders() {
        for (raw, order, channels, bitrate) in [(0, 1, 4, 48000), (1, 2, 9, 192000), (2, 3, 16, 256000)]
        {
            let header = decode(HeaderBits::ambisonic(raw, 0)).unwrap();
            assert_eq!(header.content_type(), ContentType::Ambisonic);
            assert_eq!(header.hoa_order(), Some(order));
            assert_eq!(header.channels(), channels);
            assert_eq!(header.total_channels(), channels);
            assert_eq!(header.objects(), 0);
            assert_eq!(header.channel_num_index(), None);
            assert_eq!(header.channel_layout(), None);
            assert_eq!(header.total_bitrate, bitrate);
        }

        for raw in 3..=15 {
            let err = decode(HeaderBits::ambisonic(raw, 0)).unwrap_err();
            assert!(matches!(err, HeaderError::InvalidHoaOrder(o) if o == raw + 1));
        }
    }

    #[test]
    fn ambisonic_sentinel_bitrate_is_rejected() {
        let err = decode(HeaderBits::ambisonic(0, 5)).unwrap_err();
        assert!(matches!(err, HeaderError::InvalidBitrateIndex { index: 5, .. }));
    }

    #[test]
    fn channel_sentinel_bitrate_is_rejected() {
        let err = decode(HeaderBits::channel(ChannelConfig::Stereo.index(), 11)).unwrap_err();
        assert!(matches!(err, HeaderError::InvalidBitrateIndex { index: 11, .. }));
    }

    #[test]
    fn resolutions() {
        for (index, bits, format) in [
            (0, 8, Some(SampleFormat::U8)),
            (1, 16, Some(SampleFormat::S16)),
            (2, 24, None),
        ] {
            let header = decode(HeaderBits {
                resolution_index: index,
                ..HeaderBits::channel(1, 0)
            })
            .unwrap();
            assert_eq!(header.resolution.index(), index);
            assert_eq!(header.bitdepth(), bits);
            assert_eq!(header.resolution.sample_format(), format);
        }

        let err = decode(HeaderBits {
            resolution_index: 3,
            ..HeaderBits::channel(1, 0)
        })
        .unwrap_err();
        assert!(matches!(err, HeaderError::InvalidResolutionIndex(3)));
    }

    #[test]
    fn fixed_fields_are_checked_in_order() {
        let err = decode(HeaderBits {
            sync_word: 0xFFE,
            codec_id: 1,
            ..HeaderBits::channel(1, 0)
        })
        .unwrap_err();
        assert!(matches!(err, HeaderError::InvalidSyncWord(0xFFE)));

        let err = decode(HeaderBits {
            codec_id: 1,
            ..HeaderBits::channel(1, 0)
        })
        .unwrap_err();
        assert!(matches!(err, HeaderError::UnsupportedCodec(1)));

        let err = decode(HeaderBits {
            ancillary_data: true,
            ..HeaderBits::channel(1, 0)
        })
        .unwrap_err();
        assert!(matches!(err, HeaderError::UnsupportedAncillaryData));

        for coding_profile in 3..=7 {
            let err = decode(HeaderBits {
                coding_profile,
                ..HeaderBits::channel(1, 0)
            })
            .unwrap_err();
            assert!(matches!(err, HeaderError::InvalidCodingProfile(p) if p == coding_profile));
        }
    }

    #[test]
    fn nn_type_and_crc_pass_through() {
        let header = decode(HeaderBits {
            nn_type: 7,
            crc: [0xA5, 0x5A],
            ..HeaderBits::channel(1, 3)
        })
        .unwrap();
        assert_eq!(header.nn_type, 7);
        assert_eq!(header.total_bitrate, 64000);
    }

    #[test]
    fn truncated_headers_fail_cleanly() {
        let branches = [
            HeaderBits::channel(1, 3),
            HeaderBits::objects(3, 2),
            HeaderBits::bed_objects(2, 1, 1, 4),
            HeaderBits::ambisonic(1, 0),
        ];

        for bits in branches {
            let full = bits.to_bytes();
            let needed = HeaderInfo::from_bytes(&full).unwrap().header_len();

            for len in 0..needed {
                let err = HeaderInfo::from_bytes(&full[..len]).unwrap_err();
                assert!(matches!(err, HeaderError::TruncatedHeader(_)), "len = {len}");
            }

            assert!(HeaderInfo::from_bytes(&full[..needed]).is_ok());
        }
    }

    #[test]
    fn payload_size_from_header() {
        let header = HeaderInfo::from_bytes(&EXAMPLE_HEADER).unwrap();
        assert_eq!(header.payload_size().unwrap(), 171);

        let header = decode(HeaderBits::channel(ChannelConfig::Stereo.index(), 8)).unwrap();
        assert_eq!(header.total_bitrate, 192000);
        assert_eq!(header.payload_size().unwrap(), 512);
    }
}
