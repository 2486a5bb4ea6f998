// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixed locator-only policy: 128 ports, one scan interface, two bits of
//! pattern per port.
//!
//! There is no host configuration to consult and therefore no degraded
//! mode; every tick applies the same three-state decision per port. The
//! scan hardware itself turns the `Blink` code into the actual duty
//! cycle, so this policy never looks at the tick counter.

use drv_cmicx_led_api::{IntfCtrl, LedPattern};

use crate::LedHandlerCtrl;

pub const PORT_COUNT: u16 = 128;

/// One tick of the locator policy.
pub fn handle(ctrl: &mut LedHandlerCtrl<'_>, _activities: u32) {
    for phy in 1..=PORT_COUNT {
        // Locator request trumps link state: a port being located blinks
        // whether or not it has link.
        let code = if ctrl.patt_ram.port_map(phy).locator() {
            LedPattern::Blink
        } else if ctrl.accu_ram.link_up(phy) {
            LedPattern::SolidOn
        } else {
            LedPattern::SolidOff
        };
        ctrl.patt_ram.write_slot(phy - 1, code as u16);
    }

    ctrl.intf_ctrl[0] = IntfCtrl {
        start_row: 0,
        end_row: PORT_COUNT - 1,
        pat_width: 2,
        valid: true,
    };
}
