//! The last page of the nRF52833's internal flash, programmed through the NVMC.

use core::ptr;
use memory_game::FlashPage;
use microbit::pac::NVMC;

/// Start of the reserved page: the last 4 KiB of the 512 KiB flash. The firmware is far
/// smaller, so the linker never places code here.
const PAGE_ADDRESS: usize = 0x0007_F000;
const PAGE_SIZE: usize = 4096;

pub(crate) struct NvmcPage {
    nvmc: NVMC,
}

impl NvmcPage {
    pub(crate) fn new(nvmc: NVMC) -> Self {
        NvmcPage { nvmc }
    }

    fn slot_address(slot: usize) -> *mut u32 {
        (PAGE_ADDRESS + slot * 4) as *mut u32
    }

    fn wait_ready(&self) {
        while self.nvmc.ready.read().ready().is_busy() {}
    }
}

impl FlashPage for NvmcPage {
    const SLOTS: usize = PAGE_SIZE / 4;

    fn read_slot(&self, slot: usize) -> u32 {
        unsafe { ptr::read_volatile(Self::slot_address(slot)) }
    }

    fn program_slot(&mut self, slot: usize, word: u32) {
        self.nvmc.config.write(|w| w.wen().wen());
        unsafe { ptr::write_volatile(Self::slot_address(slot), word) };
        self.wait_ready();
        self.nvmc.config.write(|w| w.wen().ren());
    }

    fn erase(&mut self) {
        self.nvmc.config.write(|w| w.wen().een());
        self.nvmc
            .erasepage()
            .write(|w| unsafe { w.bits(PAGE_ADDRESS as u32) });
        self.wait_ready();
        self.nvmc.config.write(|w| w.wen().ren());
    }
}
