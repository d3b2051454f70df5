//! Shared booster inventory and the queue of pickups awaiting credit.

use serde::Serialize;
use wrapbot_core::BoosterCode;

use crate::ActionError;

/// Credited boosters shared by every bot of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Inventory {
    counts: [u32; BoosterCode::PICKABLE.len()],
}

impl Inventory {
    /// Number of credited boosters of the given kind.
    #[must_use]
    pub fn count(&self, code: BoosterCode) -> u32 {
        slot(code).map_or(0, |index| self.counts[index])
    }

    /// Iterates over every pickable kind with its count.
    pub fn iter(&self) -> impl Iterator<Item = (BoosterCode, u32)> + '_ {
        BoosterCode::PICKABLE
            .into_iter()
            .zip(self.counts.iter().copied())
    }

    pub(crate) fn credit(&mut self, code: BoosterCode) {
        if let Some(index) = slot(code) {
            self.counts[index] += 1;
        }
    }

    pub(crate) fn spend(&mut self, code: BoosterCode) -> Result<(), ActionError> {
        let count = slot(code)
            .map(|index| &mut self.counts[index])
            .filter(|count| **count > 0)
            .ok_or(ActionError::MissingBooster(code))?;
        *count -= 1;
        Ok(())
    }
}

fn slot(code: BoosterCode) -> Option<usize> {
    BoosterCode::PICKABLE
        .iter()
        .position(|candidate| *candidate == code)
}

/// Booster collected from the map that is not usable yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PendingPickup {
    code: BoosterCode,
    turn: u32,
    picker: usize,
}

impl PendingPickup {
    /// Kind of booster collected.
    #[must_use]
    pub const fn code(&self) -> BoosterCode {
        self.code
    }

    /// Turn counter value recorded at pickup.
    ///
    /// A pickup by bot 0 records the counter after its own increment.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Index of the bot that collected it.
    #[must_use]
    pub const fn picker(&self) -> usize {
        self.picker
    }

    /// Reports whether bot `bot_index` acting at `turn` may use the booster.
    ///
    /// `turn` is the counter value before the action. Bots at or after the
    /// picker see it one turn after pickup; everyone does once the counter is
    /// past `turn + 2`.
    #[must_use]
    pub const fn is_ready(&self, turn: u32, bot_index: usize) -> bool {
        turn > self.turn + 2 || (turn == self.turn + 1 && bot_index >= self.picker)
    }
}

/// Collected boosters in pickup order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct PendingPickups {
    entries: Vec<PendingPickup>,
}

impl PendingPickups {
    pub(crate) fn entries(&self) -> &[PendingPickup] {
        &self.entries
    }

    pub(crate) fn push(&mut self, code: BoosterCode, turn: u32, picker: usize) {
        self.entries.push(PendingPickup { code, turn, picker });
    }

    /// Inventory as seen by `bot_index` acting at `turn`.
    pub(crate) fn credited(
        &self,
        mut inventory: Inventory,
        turn: u32,
        bot_index: usize,
    ) -> Inventory {
        for pickup in &self.entries {
            if pickup.is_ready(turn, bot_index) {
                inventory.credit(pickup.code);
            }
        }
        inventory
    }

    /// Drops the entries that [`PendingPickups::credited`] counted.
    pub(crate) fn settle(&mut self, turn: u32, bot_index: usize) -> usize {
        let before = self.entries.len();
        self.entries.retain(|pickup| !pickup.is_ready(turn, bot_index));
        before - self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spending_requires_a_credit() {
        let mut inventory = Inventory::default();
        assert_eq!(
            inventory.spend(BoosterCode::Drill),
            Err(ActionError::MissingBooster(BoosterCode::Drill))
        );
        inventory.credit(BoosterCode::Drill);
        assert_eq!(inventory.count(BoosterCode::Drill), 1);
        assert_eq!(inventory.spend(BoosterCode::Drill), Ok(()));
        assert_eq!(inventory.count(BoosterCode::Drill), 0);
    }

    #[test]
    fn spawn_markers_are_never_stored() {
        let mut inventory = Inventory::default();
        inventory.credit(BoosterCode::Spawn);
        assert_eq!(inventory.count(BoosterCode::Spawn), 0);
        assert!(inventory.iter().all(|(_, count)| count == 0));
    }

    #[test]
    fn pickups_wait_for_later_bots_of_the_next_turn() {
        let pickup = PendingPickup {
            code: BoosterCode::Clone,
            turn: 4,
            picker: 1,
        };
        assert!(!pickup.is_ready(4, 1), "same turn, same bot");
        assert!(!pickup.is_ready(4, 2), "same turn, later bot");
        assert!(!pickup.is_ready(5, 0), "next turn, earlier bot");
        assert!(pickup.is_ready(5, 1), "next turn, picking bot");
        assert!(pickup.is_ready(5, 3), "next turn, later bot");
        assert!(!pickup.is_ready(6, 0), "two turns later, earlier bot");
        assert!(pickup.is_ready(7, 0), "three turns later");
    }

    #[test]
    fn settle_removes_only_counted_entries() {
        let mut pending = PendingPickups::default();
        pending.push(BoosterCode::Extension, 0, 0);
        pending.push(BoosterCode::Wheels, 1, 0);
        let inventory = pending.credited(Inventory::default(), 1, 0);
        assert_eq!(inventory.count(BoosterCode::Extension), 1);
        assert_eq!(inventory.count(BoosterCode::Wheels), 0);
        assert_eq!(pending.settle(1, 0), 1);
        assert_eq!(pending.entries().len(), 1);
        assert_eq!(pending.entries()[0].code(), BoosterCode::Wheels);
    }
}
