//! Word-sized persistent storage, kept across resets and power loss.
//!
//! The game only ever stores its random seed, at [`SEED_ADDRESS`]. Boards with EEPROM can
//! implement [`PersistentStore`] directly. For boards with only NOR flash, [`WordLog`] layers
//! a small append-only log over one erasable page so that frequent seed updates do not
//! erase the page on every write.
//!
//! The log still wears the page. The game rewrites its seed on every idle animation frame,
//! so a 1024 slot page is erased every few minutes of idling, and a page rated for 10,000
//! erases lasts a few weeks of cumulative idle time.

use core::cmp::min;
use heapless::FnvIndexMap;

/// Where the random seed lives.
pub const SEED_ADDRESS: u16 = 46;

/// Value of an erased flash slot.
const ERASED: u32 = 0xFFFF_FFFF;
/// Most distinct addresses carried over when a full page is compacted.
const MAX_ADDRESSES: usize = 16;

pub trait PersistentStore {
    /// Read the word stored at `address`. Never-written words read as whatever the medium
    /// holds; the game copes with any value.
    fn read_word(&mut self, address: u16) -> u16;

    /// Store `value` at `address` in a single word-sized write.
    fn write_word(&mut self, address: u16, value: u16);
}

/// One erasable page of NOR flash, addressed in 32 bit slots.
pub trait FlashPage {
    /// Number of 32 bit slots in the page.
    const SLOTS: usize;

    fn read_slot(&self, slot: usize) -> u32;

    /// Program an erased slot.
    fn program_slot(&mut self, slot: usize, word: u32);

    /// Erase the whole page back to all ones.
    fn erase(&mut self);
}

/// [`PersistentStore`] over a single flash page.
///
/// Each write programs the next free slot with `address << 16 | value`; reads return the
/// newest slot for the address. A full page is compacted down to the latest value of each
/// address before the write goes through. Compaction carries over at most 16 addresses, and
/// never more than `SLOTS - 1`, so the triggering write always has a free slot; addresses
/// beyond that limit are lost, the most recently written ones are kept. Address `0xFFFF` is
/// reserved, as its entries could not be told apart from erased slots.
pub struct WordLog<P> {
    page: P,
    /// First erased slot. Everything before it is programmed.
    next_slot: usize,
}

impl<P: FlashPage> WordLog<P> {
    pub fn new(page: P) -> Self {
        let next_slot = (0..P::SLOTS)
            .find(|&slot| page.read_slot(slot) == ERASED)
            .unwrap_or(P::SLOTS);
        WordLog { page, next_slot }
    }

    /// Latest value written to `address`, if any.
    pub fn get(&self, address: u16) -> Option<u16> {
        (0..self.next_slot)
            .rev()
            .map(|slot| self.page.read_slot(slot))
            .find(|&entry| (entry >> 16) as u16 == address)
            .map(|entry| entry as u16)
    }

    /// Number of programmed slots.
    pub fn used_slots(&self) -> usize {
        self.next_slot
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn into_page(self) -> P {
        self.page
    }

    fn append(&mut self, address: u16, value: u16) {
        if self.next_slot >= P::SLOTS {
            self.compact(address);
        }
        if self.next_slot >= P::SLOTS {
            // zero slot page
            return;
        }
        self.page
            .program_slot(self.next_slot, (address as u32) << 16 | value as u32);
        self.next_slot += 1;
    }

    /// Rewrite the page with only the latest value of each address other than `skip`,
    /// leaving at least one slot free.
    fn compact(&mut self, skip: u16) {
        let keep = min(MAX_ADDRESSES, P::SLOTS.saturating_sub(1));
        let mut latest: FnvIndexMap<u16, u16, MAX_ADDRESSES> = FnvIndexMap::new();
        for slot in (0..self.next_slot).rev() {
            if latest.len() == keep {
                break;
            }
            let entry = self.page.read_slot(slot);
            let address = (entry >> 16) as u16;
            if address == skip || latest.contains_key(&address) {
                continue;
            }
            if latest.insert(address, entry as u16).is_err() {
                break;
            }
        }

        self.page.erase();
        self.next_slot = 0;
        for (&address, &value) in latest.iter() {
            self.page
                .program_slot(self.next_slot, (address as u32) << 16 | value as u32);
            self.next_slot += 1;
        }
    }
}

impl<P: FlashPage> PersistentStore for WordLog<P> {
    fn read_word(&mut self, address: u16) -> u16 {
        self.get(address).unwrap_or(0xFFFF)
    }

    fn write_word(&mut self, address: u16, value: u16) {
        if address == 0xFFFF || self.get(address) == Some(value) {
            return;
        }
        self.append(address, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RamPage {
        slots: [u32; 8],
        erases: usize,
    }

    impl RamPage {
        fn new() -> Self {
            RamPage {
                slots: [ERASED; 8],
                erases: 0,
            }
        }
    }

    impl FlashPage for RamPage {
        const SLOTS: usize = 8;

        fn read_slot(&self, slot: usize) -> u32 {
            self.slots[slot]
        }

        fn program_slot(&mut self, slot: usize, word: u32) {
            assert_eq!(self.slots[slot], ERASED, "slot {} programmed twice", slot);
            self.slots[slot] = word;
        }

        fn erase(&mut self) {
            self.slots = [ERASED; 8];
            self.erases += 1;
        }
    }

    #[test]
    fn test_erased_page_reads_all_ones() {
        let mut log = WordLog::new(RamPage::new());
        assert_eq!(log.read_word(SEED_ADDRESS), 0xFFFF);
        assert_eq!(log.used_slots(), 0);
    }

    #[test]
    fn test_read_after_write() {
        let mut log = WordLog::new(RamPage::new());
        log.write_word(SEED_ADDRESS, 1234);
        log.write_word(SEED_ADDRESS, 1235);
        log.write_word(7, 99);
        assert_eq!(log.read_word(SEED_ADDRESS), 1235);
        assert_eq!(log.read_word(7), 99);
        assert_eq!(log.used_slots(), 3);
    }

    #[test]
    fn test_same_value_not_rewritten() {
        let mut log = WordLog::new(RamPage::new());
        log.write_word(SEED_ADDRESS, 5);
        log.write_word(SEED_ADDRESS, 5);
        assert_eq!(log.used_slots(), 1);
    }

    #[test]
    fn test_reopen_finds_latest() {
        let mut log = WordLog::new(RamPage::new());
        for value in 10..15 {
            log.write_word(SEED_ADDRESS, value);
        }
        let mut reopened = WordLog::new(log.into_page());
        assert_eq!(reopened.used_slots(), 5);
        assert_eq!(reopened.read_word(SEED_ADDRESS), 14);
        reopened.write_word(SEED_ADDRESS, 15);
        assert_eq!(reopened.read_word(SEED_ADDRESS), 15);
    }

    #[test]
    fn test_full_page_is_compacted() {
        let mut log = WordLog::new(RamPage::new());
        log.write_word(3, 300);
        for value in 0..20 {
            log.write_word(SEED_ADDRESS, value);
        }
        assert_eq!(log.read_word(SEED_ADDRESS), 19);
        assert_eq!(log.read_word(3), 300);
        assert!(log.page().erases >= 2);
        assert!(log.used_slots() <= RamPage::SLOTS);
    }

    struct TinyPage {
        slots: [u32; 4],
    }

    impl FlashPage for TinyPage {
        const SLOTS: usize = 4;

        fn read_slot(&self, slot: usize) -> u32 {
            self.slots[slot]
        }

        fn program_slot(&mut self, slot: usize, word: u32) {
            self.slots[slot] = word;
        }

        fn erase(&mut self) {
            self.slots = [ERASED; 4];
        }
    }

    #[test]
    fn test_compaction_leaves_room_on_small_page() {
        let mut log = WordLog::new(TinyPage { slots: [ERASED; 4] });
        for address in 0..4 {
            log.write_word(address, 1);
        }
        log.write_word(9, 1);
        assert_eq!(log.read_word(9), 1);
        assert_eq!(log.used_slots(), 4);
        // the three newest addresses survive, the oldest is dropped
        assert_eq!(log.read_word(3), 1);
        assert_eq!(log.read_word(2), 1);
        assert_eq!(log.read_word(1), 1);
        assert_eq!(log.read_word(0), 0xFFFF);
    }

    #[test]
    fn test_many_addresses_on_small_page() {
        let mut log = WordLog::new(TinyPage { slots: [ERASED; 4] });
        for address in 0..40 {
            log.write_word(address, address + 100);
            assert_eq!(log.read_word(address), address + 100);
            assert!(log.used_slots() <= TinyPage::SLOTS);
        }
    }

    #[test]
    fn test_reserved_address_ignored() {
        let mut log = WordLog::new(RamPage::new());
        log.write_word(0xFFFF, 1);
        assert_eq!(log.used_slots(), 0);
    }
}
