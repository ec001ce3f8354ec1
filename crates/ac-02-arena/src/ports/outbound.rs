//! # Driven Ports (SPI - Outbound)
//!
//! Configuration tables the arena reads. Implemented by
//! [`crate::adapters::TableSheets`]; tests may provide their own.

use crate::domain::sheets::{
    ArenaRewardRow, ArenaRow, CharacterRow, MaterialItemRow, RatingBandRow, RewardCountRow,
    RuneRow, Sheet,
};

/// Read-only sheet access.
pub trait SheetProvider {
    /// Round schedules by championship.
    fn arena(&self) -> &Sheet<ArenaRow>;

    /// Rating delta bands.
    fn rating_bands(&self) -> &Sheet<RatingBandRow>;

    /// Reward budget per score.
    fn reward_counts(&self) -> &Sheet<RewardCountRow>;

    /// Weighted material rewards.
    fn rewards(&self) -> &Sheet<ArenaRewardRow>;

    /// Known materials, medals included.
    fn materials(&self) -> &Sheet<MaterialItemRow>;

    /// Rune stats.
    fn runes(&self) -> &Sheet<RuneRow>;

    /// Character base stats.
    fn characters(&self) -> &Sheet<CharacterRow>;
}

impl<T: SheetProvider + ?Sized> SheetProvider for &T {
    fn arena(&self) -> &Sheet<ArenaRow> {
        (**self).arena()
    }

    fn rating_bands(&self) -> &Sheet<RatingBandRow> {
        (**self).rating_bands()
    }

    fn reward_counts(&self) -> &Sheet<RewardCountRow> {
        (**self).reward_counts()
    }

    fn rewards(&self) -> &Sheet<ArenaRewardRow> {
        (**self).rewards()
    }

    fn materials(&self) -> &Sheet<MaterialItemRow> {
        (**self).materials()
    }

    fn runes(&self) -> &Sheet<RuneRow> {
        (**self).runes()
    }

    fn characters(&self) -> &Sheet<CharacterRow> {
        (**self).characters()
    }
}
