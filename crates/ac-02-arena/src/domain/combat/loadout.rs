//! # Loadout Validation
//!
//! Checks the equipment, costumes and runes an attacker brings to a battle
//! against its inventory. Checks run in a fixed order so that every node
//! reports the same error for the same payload:
//!
//! 1. unknown item → `ItemDoesNotExist`
//! 2. repeated item or too many items of a category → `DuplicateEquipment`
//! 3. two costumes of one category → `DuplicateCostume`
//! 4. locked item → `RequiredBlockIndex`
//! 5. equipment slot locked at the avatar level → `EquipmentSlotUnlock`
//! 6. two runes in one slot → `DuplicatedRuneSlotIndex`
//! 7. same rune twice → `DuplicatedRuneId`
//! 8. rune slot locked → `EquipmentSlotUnlock`
//! 9. rune not owned or unknown → `RuneNotFound`

use crate::domain::config::GameConfig;
use crate::domain::entities::{AvatarState, Costume, Equipment};
use crate::domain::sheets::{RuneRow, Sheet};
use crate::domain::value_objects::{EquipmentCategory, ItemId, RuneSlotInfo, StatModifier};
use crate::errors::ArenaError;
use shared_types::BlockIndex;
use std::collections::{BTreeMap, BTreeSet};

/// Items requested for a battle, as sent in the payload.
#[derive(Clone, Copy, Debug)]
pub struct LoadoutRequest<'a> {
    pub equipments: &'a [ItemId],
    pub costumes: &'a [ItemId],
    pub rune_infos: &'a [RuneSlotInfo],
}

/// A rune resolved against the avatar and the rune sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EquippedRune {
    pub slot_index: u32,
    pub rune_id: u32,
    pub level: u32,
    pub row: RuneRow,
}

impl EquippedRune {
    /// Stat bonus of the rune at its level.
    #[must_use]
    pub fn modifier(&self) -> StatModifier {
        StatModifier::new(
            self.row.stat,
            self.row.value_per_level.saturating_mul(u64::from(self.level)),
        )
    }
}

/// A validated loadout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Loadout {
    pub equipments: Vec<Equipment>,
    pub costumes: Vec<Costume>,
    pub runes: Vec<EquippedRune>,
}

impl Loadout {
    /// Every stat bonus in payload order: equipment, costumes, runes.
    #[must_use]
    pub fn modifiers(&self) -> Vec<StatModifier> {
        self.equipments
            .iter()
            .map(|equipment| equipment.stat)
            .chain(self.costumes.iter().filter_map(|costume| costume.stat))
            .chain(self.runes.iter().map(EquippedRune::modifier))
            .collect()
    }
}

/// Validates `request` for `avatar` at `block_index`.
///
/// # Errors
/// The first failing check in the order listed in the module docs.
pub fn validate_loadout(
    avatar: &AvatarState,
    request: LoadoutRequest<'_>,
    config: &GameConfig,
    runes: &Sheet<RuneRow>,
    block_index: BlockIndex,
) -> Result<Loadout, ArenaError> {
    let inventory = &avatar.inventory;

    let equipments = request
        .equipments
        .iter()
        .map(|id| {
            inventory
                .equipments
                .get(id)
                .cloned()
                .ok_or(ArenaError::ItemDoesNotExist(*id))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let costumes = request
        .costumes
        .iter()
        .map(|id| {
            inventory
                .costumes
                .get(id)
                .cloned()
                .ok_or(ArenaError::ItemDoesNotExist(*id))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen_items = BTreeSet::new();
    let mut per_category: BTreeMap<EquipmentCategory, usize> = BTreeMap::new();
    for equipment in &equipments {
        let count = per_category.entry(equipment.category).or_insert(0);
        *count += 1;
        if !seen_items.insert(equipment.item_id) || *count > equipment.category.max_equipped() {
            return Err(ArenaError::DuplicateEquipment {
                item_id: equipment.item_id,
                category: equipment.category,
            });
        }
    }

    let mut seen_costume_categories = BTreeSet::new();
    for costume in &costumes {
        if !seen_costume_categories.insert(costume.category) {
            return Err(ArenaError::DuplicateCostume(costume.category));
        }
    }

    if let Some(locked) = equipments
        .iter()
        .find(|equipment| equipment.required_block_index > block_index)
    {
        return Err(ArenaError::RequiredBlockIndex {
            item_id: locked.item_id,
            required: locked.required_block_index,
            current: block_index,
        });
    }

    for (category, count) in &per_category {
        let unlock_levels = config.slot_unlock_levels(*category);
        match unlock_levels.get(count - 1) {
            Some(required) if *required <= avatar.level => {}
            Some(required) => {
                return Err(ArenaError::EquipmentSlotUnlock {
                    slot: format!("{category} #{count}"),
                    requirement: format!("level {required}, avatar is level {}", avatar.level),
                })
            }
            None => {
                return Err(ArenaError::EquipmentSlotUnlock {
                    slot: format!("{category} #{count}"),
                    requirement: "no such slot".into(),
                })
            }
        }
    }

    let mut slots = BTreeSet::new();
    if let Some(info) = request.rune_infos.iter().find(|info| !slots.insert(info.slot_index)) {
        return Err(ArenaError::DuplicatedRuneSlotIndex(info.slot_index));
    }
    let mut rune_ids = BTreeSet::new();
    if let Some(info) = request.rune_infos.iter().find(|info| !rune_ids.insert(info.rune_id)) {
        return Err(ArenaError::DuplicatedRuneId(info.rune_id));
    }

    if let Some(info) = request
        .rune_infos
        .iter()
        .find(|info| !avatar.unlocked_rune_slots.contains(&info.slot_index))
    {
        return Err(ArenaError::EquipmentSlotUnlock {
            slot: format!("rune slot {}", info.slot_index),
            requirement: "slot not unlocked".into(),
        });
    }

    let equipped_runes = request
        .rune_infos
        .iter()
        .map(|info| {
            let level = avatar
                .runes
                .get(&info.rune_id)
                .copied()
                .ok_or(ArenaError::RuneNotFound(info.rune_id))?;
            let row = runes
                .get(&info.rune_id)
                .copied()
                .ok_or(ArenaError::RuneNotFound(info.rune_id))?;
            Ok(EquippedRune {
                slot_index: info.slot_index,
                rune_id: info.rune_id,
                level,
                row,
            })
        })
        .collect::<Result<Vec<_>, ArenaError>>()?;

    Ok(Loadout {
        equipments,
        costumes,
        runes: equipped_runes,
    })
}
