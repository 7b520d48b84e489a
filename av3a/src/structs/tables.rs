//! Static configuration tables.
//!
//! ## Sampling Rates
//!
//! Nine rates from 192 kHz down to 8 kHz, selected by a 4-bit index.
//!
//! ## Channel Configurations
//!
//! Fourteen configurations keyed by the 7-bit `channel_num_index`: mono,
//! stereo, nine multichannel beds and three ambisonic orders. Each
//! configuration owns its channel count, bed name, speaker layout and a
//! 16-slot bitrate table whose unused trailing slots hold a zero sentinel.

use std::fmt::Display;

use crate::utils::errors::HeaderError;

/// Number of slots in every bitrate table.
pub const BITRATE_TABLE_SIZE: usize = 16;

/// Number of entries in the sampling rate table.
pub const SAMPLING_RATE_TABLE_SIZE: usize = 9;

pub const SAMPLING_RATE_TABLE: [u32; SAMPLING_RATE_TABLE_SIZE] = [
    192000, 96000, 48000, 44100, 32000, 24000, 22050, 16000, 8000,
];

pub type BitrateTable = [u64; BITRATE_TABLE_SIZE];

pub const BITRATE_TABLE_MONO: BitrateTable = [
    16000, 32000, 44000, 56000, 64000, 72000, 80000, 96000, 128000, 144000, 164000, 192000, 0, 0,
    0, 0,
];

pub const BITRATE_TABLE_STEREO: BitrateTable = [
    24000, 32000, 48000, 64000, 80000, 96000, 128000, 144000, 192000, 256000, 320000, 0, 0, 0, 0,
    0,
];

pub const BITRATE_TABLE_MC_5_1: BitrateTable = [
    192000, 256000, 320000, 384000, 448000, 512000, 640000, 720000, 144000, 96000, 128000, 160000,
    0, 0, 0, 0,
];

pub const BITRATE_TABLE_MC_7_1: BitrateTable = [
    192000, 480000, 256000, 384000, 576000, 640000, 128000, 160000, 0, 0, 0, 0, 0, 0, 0, 0,
];

pub const BITRATE_TABLE_MC_4_0: BitrateTable = [
    48000, 96000, 128000, 192000, 256000, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

pub const BITRATE_TABLE_MC_5_1_2: BitrateTable = [
    152000, 320000, 480000, 576000, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

pub const BITRATE_TABLE_MC_5_1_4: BitrateTable = [
    176000, 384000, 576000, 704000, 256000, 448000, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

pub const BITRATE_TABLE_MC_7_1_2: BitrateTable = [
    216000, 480000, 576000, 384000, 768000, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

pub const BITRATE_TABLE_MC_7_1_4: BitrateTable = [
    240000, 608000, 384000, 512000, 832000, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

pub const BITRATE_TABLE_FOA: BitrateTable = [
    48000, 96000, 128000, 192000, 256000, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

pub const BITRATE_TABLE_HOA2: BitrateTable = [
    192000, 256000, 320000, 384000, 480000, 512000, 640000, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

pub const BITRATE_TABLE_HOA3: BitrateTable = [
    256000, 320000, 384000, 512000, 640000, 896000, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

// 10.2 and 22.2 have no coded bitrates.
const BITRATE_TABLE_UNDEFINED: BitrateTable = [0; BITRATE_TABLE_SIZE];

pub fn sampling_rate(index: u8) -> Result<u32, HeaderError> {
    SAMPLING_RATE_TABLE
        .get(index as usize)
        .copied()
        .ok_or(HeaderError::InvalidSamplingRateIndex(index))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChannelConfig {
    Mono = 0,
    Stereo = 1,
    Mc5_1 = 2,
    Mc7_1 = 3,
    Mc10_2 = 4,
    Mc22_2 = 5,
    Mc4_0 = 6,
    Mc5_1_2 = 7,
    Mc5_1_4 = 8,
    Mc7_1_2 = 9,
    Mc7_1_4 = 10,
    HoaOrder1 = 11,
    HoaOrder2 = 12,
    HoaOrder3 = 13,
}

impl ChannelConfig {
    pub const ALL: [ChannelConfig; 14] = [
        ChannelConfig::Mono,
        ChannelConfig::Stereo,
        ChannelConfig::Mc5_1,
        ChannelConfig::Mc7_1,
        ChannelConfig::Mc10_2,
        ChannelConfig::Mc22_2,
        ChannelConfig::Mc4_0,
        ChannelConfig::Mc5_1_2,
        ChannelConfig::Mc5_1_4,
        ChannelConfig::Mc7_1_2,
        ChannelConfig::Mc7_1_4,
        ChannelConfig::HoaOrder1,
        ChannelConfig::HoaOrder2,
        ChannelConfig::HoaOrder3,
    ];

    /// Maps a wire `channel_num_index` to its configuration.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn channels(self) -> u16 {
        match self {
            ChannelConfig::Mono => 1,
            ChannelConfig::Stereo => 2,
            ChannelConfig::Mc5_1 => 6,
            ChannelConfig::Mc7_1 => 8,
            ChannelConfig::Mc10_2 => 12,
            ChannelConfig::Mc22_2 => 24,
            ChannelConfig::Mc4_0 => 4,
            ChannelConfig::Mc5_1_2 => 8,
            ChannelConfig::Mc5_1_4 => 10,
            ChannelConfig::Mc7_1_2 => 10,
            ChannelConfig::Mc7_1_4 => 12,
            ChannelConfig::HoaOrder1 => 4,
            ChannelConfig::HoaOrder2 => 9,
            ChannelConfig::HoaOrder3 => 16,
        }
    }

    /// Name of a multichannel bed. Only these configurations may carry
    /// objects on top.
    pub const fn bed_name(self) -> Option<&'static str> {
        match self {
            ChannelConfig::Stereo => Some("STEREO"),
            ChannelConfig::Mc5_1 => Some("MC_5_1_0"),
            ChannelConfig::Mc7_1 => Some("MC_7_1_0"),
            ChannelConfig::Mc10_2 => Some("MC_10_2"),
            ChannelConfig::Mc22_2 => Some("MC_22_2"),
            ChannelConfig::Mc4_0 => Some("MC_4_0"),
            ChannelConfig::Mc5_1_2 => Some("MC_5_1_2"),
            ChannelConfig::Mc5_1_4 => Some("MC_5_1_4"),
            ChannelConfig::Mc7_1_2 => Some("MC_7_1_2"),
            ChannelConfig::Mc7_1_4 => Some("MC_7_1_4"),
            ChannelConfig::Mono
            | ChannelConfig::HoaOrder1
            | ChannelConfig::HoaOrder2
            | ChannelConfig::HoaOrder3 => None,
        }
    }

    pub const fn is_ambisonic(self) -> bool {
        matches!(
            self,
            ChannelConfig::HoaOrder1 | ChannelConfig::HoaOrder2 | ChannelConfig::HoaOrder3
        )
    }

    pub const fn layout(self) -> Option<ChannelLayout> {
        match self {
            ChannelConfig::Mono => Some(ChannelLayout::Mono),
            ChannelConfig::Stereo => Some(ChannelLayout::Stereo),
            ChannelConfig::Mc5_1 => Some(ChannelLayout::FivePointOne),
            ChannelConfig::Mc7_1 => Some(ChannelLayout::SevenPointOne),
            ChannelConfig::Mc22_2 => Some(ChannelLayout::TwentyTwoPointTwo),
            _ => None,
        }
    }

    pub const fn bitrate_table(self) -> &'static BitrateTable {
        match self {
            ChannelConfig::Mono => &BITRATE_TABLE_MONO,
            ChannelConfig::Stereo => &BITRATE_TABLE_STEREO,
            ChannelConfig::Mc5_1 => &BITRATE_TABLE_MC_5_1,
            ChannelConfig::Mc7_1 => &BITRATE_TABLE_MC_7_1,
            ChannelConfig::Mc10_2 | ChannelConfig::Mc22_2 => &BITRATE_TABLE_UNDEFINED,
            ChannelConfig::Mc4_0 => &BITRATE_TABLE_MC_4_0,
            ChannelConfig::Mc5_1_2 => &BITRATE_TABLE_MC_5_1_2,
            ChannelConfig::Mc5_1_4 => &BITRATE_TABLE_MC_5_1_4,
            ChannelConfig::Mc7_1_2 => &BITRATE_TABLE_MC_7_1_2,
            ChannelConfig::Mc7_1_4 => &BITRATE_TABLE_MC_7_1_4,
            ChannelConfig::HoaOrder1 => &BITRATE_TABLE_FOA,
            ChannelConfig::HoaOrder2 => &BITRATE_TABLE_HOA2,
            ChannelConfig::HoaOrder3 => &BITRATE_TABLE_HOA3,
        }
    }

    /// Looks up the bitrate at `index`. Sentinel slots are errors, not a
    /// zero bitrate.
    pub fn bitrate(self, index: u8) -> Result<u64, HeaderError> {
        match self.bitrate_table().get(index as usize) {
            Some(&bitrate) if bitrate != 0 => Ok(bitrate),
            _ => Err(HeaderError::InvalidBitrateIndex {
                index,
                config: self.name(),
            }),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ChannelConfig::Mono => "MONO",
            ChannelConfig::HoaOrder1 => "HOA_ORDER1",
            ChannelConfig::HoaOrder2 => "HOA_ORDER2",
            ChannelConfig::HoaOrder3 => "HOA_ORDER3",
            bed => match bed.bed_name() {
                Some(name) => name,
                None => "UNKNOWN",
            },
        }
    }
}

impl Display for ChannelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Standard speaker layouts a channel configuration can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    Mono,
    Stereo,
    /// 5.1 with back surrounds.
    FivePointOne,
    SevenPointOne,
    TwentyTwoPointTwo,
}

impl ChannelLayout {
    pub const fn labels(self) -> &'static [ChannelLabel] {
        use ChannelLabel::*;

        match self {
            ChannelLayout::Mono => &[FC],
            ChannelLayout::Stereo => &[FL, FR],
            ChannelLayout::FivePointOne => &[FL, FR, FC, LFE, BL, BR],
            ChannelLayout::SevenPointOne => &[FL, FR, FC, LFE, BL, BR, SL, SR],
            ChannelLayout::TwentyTwoPointTwo => &[
                FL, FR, FC, LFE, BL, BR, FLC, FRC, BC, LFE2, SL, SR, TFL, TFR, TFC, TC, TBL, TBR,
                TSL, TSR, TBC, BFC, BFL, BFR,
            ],
        }
    }

    pub fn mask(self) -> u64 {
        self.labels().iter().fold(0, |mask, label| mask | label.mask())
    }
}

impl Display for ChannelLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelLayout::Mono => write!(f, "mono"),
            ChannelLayout::Stereo => write!(f, "stereo"),
            ChannelLayout::FivePointOne => write!(f, "5.1(back)"),
            ChannelLayout::SevenPointOne => write!(f, "7.1"),
            ChannelLayout::TwentyTwoPointTwo => write!(f, "22.2"),
        }
    }
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelLabel {
    FL,
    FR,
    FC,
    LFE,
    BL,
    BR,
    FLC,
    FRC,
    BC,
    SL,
    SR,
    TC,
    TFL,
    TFC,
    TFR,
    TBL,
    TBC,
    TBR,
    LFE2,
    TSL,
    TSR,
    BFC,
    BFL,
    BFR,
}

impl ChannelLabel {
    /// Speaker position bit.
    pub const fn mask(self) -> u64 {
        let bit = match self {
            ChannelLabel::FL => 0,
            ChannelLabel::FR => 1,
            ChannelLabel::FC => 2,
            ChannelLabel::LFE => 3,
            ChannelLabel::BL => 4,
            ChannelLabel::BR => 5,
            ChannelLabel::FLC => 6,
            ChannelLabel::FRC => 7,
            ChannelLabel::BC => 8,
            ChannelLabel::SL => 9,
            ChannelLabel::SR => 10,
            ChannelLabel::TC => 11,
            ChannelLabel::TFL => 12,
            ChannelLabel::TFC => 13,
            ChannelLabel::TFR => 14,
            ChannelLabel::TBL => 15,
            ChannelLabel::TBC => 16,
            ChannelLabel::TBR => 17,
            ChannelLabel::LFE2 => 35,
            ChannelLabel::TSL => 36,
            ChannelLabel::TSR => 37,
            ChannelLabel::BFC => 38,
            ChannelLabel::BFL => 39,
            ChannelLabel::BFR => 40,
        };

        1 << bit
    }
}

#[test]
fn sampling_rate_table_lookup() {
    for (index, &rate) in SAMPLING_RATE_TABLE.iter().enumerate() {
        assert_eq!(sampling_rate(index as u8).unwrap(), rate);
    }

    for index in 9..=15 {
        assert!(matches!(
            sampling_rate(index),
            Err(HeaderError::InvalidSamplingRateIndex(i)) if i == index
        ));
    }
}

#[test]
fn channel_config_index_round_trip() {
    for (index, config) in ChannelConfig::ALL.iter().enumerate() {
        assert_eq!(config.index() as usize, index);
        assert_eq!(ChannelConfig::from_index(index as u8), Some(*config));
    }

    assert_eq!(ChannelConfig::from_index(14), None);
    assert_eq!(ChannelConfig::from_index(127), None);
}

#[test]
fn layouts_match_channel_counts() {
    for config in ChannelConfig::ALL {
        if let Some(layout) = config.layout() {
            assert_eq!(layout.labels().len(), config.channels() as usize);
            assert_eq!(layout.mask().count_ones(), config.channels() as u32);
        }
    }

    assert_eq!(ChannelLayout::Stereo.mask(), 0x3);
    assert_eq!(ChannelLayout::FivePointOne.mask(), 0x3F);
    assert_eq!(ChannelLayout::SevenPointOne.mask(), 0x63F);
}

#[test]
fn bed_names_cover_multichannel_configs() {
    let beds = ChannelConfig::ALL
        .iter()
        .filter(|config| config.bed_name().is_some())
        .count();
    assert_eq!(beds, 10);
    assert_eq!(ChannelConfig::Mono.bed_name(), None);
    assert_eq!(ChannelConfig::HoaOrder2.bed_name(), None);
    assert_eq!(ChannelConfig::Mc5_1_4.name(), "MC_5_1_4");
}

#[test]
fn bitrate_sentinel_is_rejected() {
    assert_eq!(ChannelConfig::Stereo.bitrate(3).unwrap(), 64000);
    assert_eq!(ChannelConfig::Mono.bitrate(11).unwrap(), 192000);
    assert_eq!(ChannelConfig::HoaOrder3.bitrate(5).unwrap(), 896000);

    assert!(matches!(
        ChannelConfig::Stereo.bitrate(11),
        Err(HeaderError::InvalidBitrateIndex { index: 11, .. })
    ));
    assert!(matches!(
        ChannelConfig::Mono.bitrate(16),
        Err(HeaderError::InvalidBitrateIndex { index: 16, .. })
    ));

    for index in 0..BITRATE_TABLE_SIZE as u8 {
        assert!(ChannelConfig::Mc22_2.bitrate(index).is_err());
        assert!(ChannelConfig::Mc10_2.bitrate(index).is_err());
    }
}

#[test]
fn bitrate_tables_have_contiguous_prefix() {
    for config in ChannelConfig::ALL {
        let table = config.bitrate_table();
        let defined = table.iter().take_while(|&&rate| rate != 0).count();
        assert!(table[defined..].iter().all(|&rate| rate == 0), "{config}");
    }
}
