use nyla_core::{Keybind, ModMask, utils::xkeysym_lookup::XKeysym};
use x11rb::{
    connection::Connection,
    protocol::xproto::{self, Keycode},
};

use super::XWrap;
use crate::error::Result;

/// The server's keycode to keysym table.
#[derive(Debug, Default)]
pub(crate) struct Keymap {
    min_keycode: Keycode,
    keysyms_per_keycode: usize,
    keysyms: Vec<XKeysym>,
}

impl Keymap {
    pub fn new(min_keycode: Keycode, keysyms_per_keycode: u8, keysyms: Vec<XKeysym>) -> Self {
        Self {
            min_keycode,
            keysyms_per_keycode: usize::from(keysyms_per_keycode),
            keysyms,
        }
    }

    pub fn fetch(conn: &impl Connection) -> Result<Self> {
        let setup = conn.setup();
        let (min, max) = (setup.min_keycode, setup.max_keycode);
        let reply = xproto::get_keyboard_mapping(conn, min, max - min + 1)?.reply()?;
        Ok(Self::new(min, reply.keysyms_per_keycode, reply.keysyms))
    }

    /// The unshifted keysym of a key.
    pub fn keysym(&self, keycode: Keycode) -> Option<XKeysym> {
        let index = usize::from(keycode.checked_sub(self.min_keycode)?) * self.keysyms_per_keycode;
        self.keysyms.get(index).copied().filter(|k| *k != 0)
    }

    /// Every key that produces `keysym` in any of its columns.
    pub fn keycodes(&self, keysym: XKeysym) -> Vec<Keycode> {
        if self.keysyms_per_keycode == 0 {
            return vec![];
        }
        self.keysyms
            .chunks(self.keysyms_per_keycode)
            .enumerate()
            .filter(|(_, syms)| syms.contains(&keysym))
            .filter_map(|(i, _)| u8::try_from(i).ok())
            .filter_map(|i| self.min_keycode.checked_add(i))
            .collect()
    }
}

impl XWrap {
    pub fn refresh_keymap(&mut self) -> Result<()> {
        self.keymap = Keymap::fetch(&self.conn)?;
        Ok(())
    }

    /// Replaces every key grab on the root window with the given bindings.
    pub fn grab_keys(&self, bindings: &[Keybind]) -> Result<()> {
        xproto::ungrab_key(&self.conn, xproto::Grab::ANY, self.root, xproto::ModMask::ANY)?;
        for binding in bindings {
            let keycodes = self.keymap.keycodes(binding.key);
            if keycodes.is_empty() {
                tracing::warn!(keysym = binding.key, "No key produces this keysym, not grabbing it.");
            }
            for keycode in keycodes {
                self.grab_key(keycode, binding.modifier)?;
            }
        }
        Ok(())
    }

    // Also grab with the lock modifiers, they are ignored when matching.
    fn grab_key(&self, keycode: Keycode, modifier: ModMask) -> Result<()> {
        let locks = [
            ModMask::Zero,
            ModMask::Lock,
            ModMask::NumLock,
            ModMask::Lock | ModMask::NumLock,
        ];
        for lock in locks {
            xproto::grab_key(
                &self.conn,
                true,
                self.root,
                xproto::ModMask::from((modifier | lock).bits()),
                keycode,
                xproto::GrabMode::ASYNC,
                xproto::GrabMode::ASYNC,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Two keysyms per key, starting at keycode 8.
    fn keymap() -> Keymap {
        Keymap::new(8, 2, vec![0x71, 0x51, 0xff0d, 0, 0x31, 0x21, 0x71, 0x51])
    }

    #[test]
    fn keycodes_map_to_their_unshifted_keysym() {
        let keymap = keymap();
        assert_eq!(keymap.keysym(8), Some(0x71));
        assert_eq!(keymap.keysym(9), Some(0xff0d));
        assert_eq!(keymap.keysym(7), None);
        assert_eq!(keymap.keysym(100), None);
    }

    #[test]
    fn every_key_producing_a_keysym_is_found() {
        let keymap = keymap();
        assert_eq!(keymap.keycodes(0x71), vec![8, 11]);
        assert_eq!(keymap.keycodes(0x21), vec![10]);
        assert!(keymap.keycodes(0xffbe).is_empty());
    }

    #[test]
    fn an_empty_keymap_has_no_keys() {
        let keymap = Keymap::default();
        assert_eq!(keymap.keysym(8), None);
        assert!(keymap.keycodes(0x71).is_empty());
    }
}
