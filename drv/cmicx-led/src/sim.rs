// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Simulated LED processor memory for host-side tests: plain arrays stand
//! in for ACCU RAM, PATT RAM, and the shared debug/control window, and
//! each `tick_*` call rebuilds the caller descriptor the way the real
//! runtime would.

use drv_cmicx_led_api::{
    IntfCtrl, PlCtrl, PlDbg, PortMapEntry, LED_HW_LINK_UP, LED_INTF_COUNT,
};

use crate::mem::{
    AccuRam, PattRam, SharedMem, ACCU_RAM_CELLS, PATT_RAM_CELLS,
    PORT_MAP_BASE,
};
use crate::{locator, mapped, LedHandlerCtrl};

/// Host shared-memory window: debug block at the base, control block
/// right behind it, same as the hardware layout.
#[repr(C)]
pub struct ShmBuf {
    pub dbg: PlDbg,
    pub ctrl: PlCtrl,
}

pub struct Harness {
    accu: Box<[u32; ACCU_RAM_CELLS]>,
    patt: Box<[u32; PATT_RAM_CELLS]>,
    pub shm: Box<ShmBuf>,
    pub intf: [IntfCtrl; LED_INTF_COUNT],
}

impl Harness {
    pub fn new() -> Self {
        Harness {
            accu: Box::new([0; ACCU_RAM_CELLS]),
            patt: Box::new([0; PATT_RAM_CELLS]),
            shm: Box::new(ShmBuf {
                dbg: PlDbg {
                    magic: 0,
                    length: 0,
                    ctrl_base: 0,
                    activities: 0,
                    rsvd: 0,
                },
                ctrl: PlCtrl::new_host(),
            }),
            intf: [IntfCtrl::default(); LED_INTF_COUNT],
        }
    }

    /// Flips the link-up bit in a port's ACCU word (1-based port).
    pub fn set_link(&mut self, port: u16, up: bool) {
        let cell = &mut self.accu[usize::from(port) - 1];
        if up {
            *cell |= u32::from(LED_HW_LINK_UP);
        } else {
            *cell &= !u32::from(LED_HW_LINK_UP);
        }
    }

    /// Writes a port map entry the way the host driver would (1-based
    /// port).
    pub fn set_map(&mut self, port: u16, entry: PortMapEntry) {
        self.patt[PORT_MAP_BASE + usize::from(port) - 1] =
            u32::from(entry.raw());
    }

    pub fn slot(&self, slot: usize) -> u16 {
        self.patt[slot] as u16
    }

    pub fn set_slot(&mut self, slot: usize, value: u16) {
        self.patt[slot] = u32::from(value);
    }

    pub fn tick_locator(&mut self, activities: u32) {
        let mut ctrl = self.hw_ctrl();
        locator::handle(&mut ctrl, activities);
    }

    pub fn tick_mapped(&mut self, activities: u32) {
        let shmem = unsafe {
            SharedMem::from_raw(&mut *self.shm as *mut ShmBuf as *mut u8)
        };
        let mut ctrl = self.hw_ctrl();
        mapped::handle(&mut ctrl, &shmem, activities);
    }

    fn hw_ctrl(&mut self) -> LedHandlerCtrl<'_> {
        LedHandlerCtrl {
            accu_ram: unsafe { AccuRam::from_raw(self.accu.as_mut_ptr()) },
            patt_ram: unsafe { PattRam::from_raw(self.patt.as_mut_ptr()) },
            intf_ctrl: &mut self.intf,
        }
    }
}
