// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host-configured policy: 512 ports, up to five scan interfaces, pattern
//! codes and port -> LED assignment supplied by the host driver through
//! the shared-memory control block.
//!
//! Each tick runs two passes over the port map. The first writes every
//! mapped LED's off code; the second re-lights the LEDs whose ports have
//! link. The split is load-bearing: slot assignments can change between
//! ticks (hot reconfiguration, ports sharing an LED), and the clear pass
//! guarantees a port that lost link or lost its mapping cannot leave last
//! tick's on code behind. When several ports map to the same LED, the
//! highest-numbered port with link wins; that tie-break is part of the
//! observable contract.

use drv_cmicx_led_api::{
    LED_INTF_COUNT, LED_TICKS_SHIFT, SENTINEL_BEEF, SENTINEL_DEAD,
};
use static_assertions::const_assert;

use crate::mem::{SharedMem, PATT_RAM_CELLS, PORT_MAP_BASE};
use crate::LedHandlerCtrl;

pub const PORT_COUNT: u16 = 512;

// The port map window must fit behind the pattern slots.
const_assert!(PORT_MAP_BASE + PORT_COUNT as usize <= PATT_RAM_CELLS);

/// One tick of the mapped policy.
///
/// The debug block is written before anything else so the host can always
/// see the last activities word and descriptor address, even while the
/// control block is invalid.
pub fn handle(
    ctrl: &mut LedHandlerCtrl<'_>,
    shmem: &SharedMem,
    activities: u32,
) {
    let tick = activities >> LED_TICKS_SHIFT;

    let ctrl_base = ctrl as *const LedHandlerCtrl<'_> as usize as u32;
    shmem.write_debug(ctrl_base, activities);

    let led_ctrl = match shmem.read_control() {
        Ok(led_ctrl) => led_ctrl,
        Err(_) => {
            // Degraded mode: flag the failure where the host can see it
            // and keep the scan hardware off the stale pattern rows.
            ctrl.patt_ram.write_slot(0, SENTINEL_DEAD);
            ctrl.patt_ram.write_slot(1, SENTINEL_BEEF);
            for intf in ctrl.intf_ctrl.iter_mut() {
                intf.valid = false;
            }
            return;
        }
    };

    // Clear pass: every mapped LED starts the tick at its off code.
    for phy in 1..=PORT_COUNT {
        let entry = ctrl.patt_ram.port_map(phy);
        let led = entry.led();
        if led == 0 {
            continue;
        }
        let off = led_ctrl.patt[usize::from(entry.pid())].led_off;
        ctrl.patt_ram.write_slot(led - 1, off);
    }

    // Light pass: ports with link override the off code. Link-down ports
    // write nothing here; the clear pass already produced their result.
    for phy in 1..=PORT_COUNT {
        let entry = ctrl.patt_ram.port_map(phy);
        let led = entry.led();
        if led == 0 {
            continue;
        }
        if !ctrl.accu_ram.link_up(phy) {
            continue;
        }
        let patt = led_ctrl.patt[usize::from(entry.pid())];
        let code = if entry.blink() {
            // All blinking ports share the tick counter, so they toggle
            // in phase at half the tick rate.
            if tick & 1 == 1 {
                patt.led_on
            } else {
                patt.led_off
            }
        } else {
            patt.led_on
        };
        ctrl.patt_ram.write_slot(led - 1, code);
    }

    // Scan range passthrough, straight from the control block. The host
    // is trusted to supply sane rows here; only the block as a whole is
    // validated.
    for (i, intf) in
        ctrl.intf_ctrl.iter_mut().enumerate().take(LED_INTF_COUNT)
    {
        let conf = led_ctrl.intf_conf(i);
        intf.start_row = conf.head() as u16;
        intf.end_row = conf.tail() as u16;
        intf.pat_width = conf.bits() as u8;
        intf.valid = conf.valid();
    }
}
