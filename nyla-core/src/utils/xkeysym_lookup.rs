//! Names of the keys that can be bound, mapped to X keysyms.

use x11_dl::keysym;

pub type XKeysym = u32;

/// Looks up a key by its X keysym name (`"a"`, `"Return"`, `"XF86AudioMute"`), the names
/// `xev` prints. Letters match in either case since bindings use the unshifted keysym.
#[must_use]
pub fn into_keysym(name: &str) -> Option<XKeysym> {
    let sym = match name {
        "a" | "A" => keysym::XK_a,
        "b" | "B" => keysym::XK_b,
        "c" | "C" => keysym::XK_c,
        "d" | "D" => keysym::XK_d,
        "e" | "E" => keysym::XK_e,
        "f" | "F" => keysym::XK_f,
        "g" | "G" => keysym::XK_g,
        "h" | "H" => keysym::XK_h,
        "i" | "I" => keysym::XK_i,
        "j" | "J" => keysym::XK_j,
        "k" | "K" => keysym::XK_k,
        "l" | "L" => keysym::XK_l,
        "m" | "M" => keysym::XK_m,
        "n" | "N" => keysym::XK_n,
        "o" | "O" => keysym::XK_o,
        "p" | "P" => keysym::XK_p,
        "q" | "Q" => keysym::XK_q,
        "r" | "R" => keysym::XK_r,
        "s" | "S" => keysym::XK_s,
        "t" | "T" => keysym::XK_t,
        "u" | "U" => keysym::XK_u,
        "v" | "V" => keysym::XK_v,
        "w" | "W" => keysym::XK_w,
        "x" | "X" => keysym::XK_x,
        "y" | "Y" => keysym::XK_y,
        "z" | "Z" => keysym::XK_z,
        "0" => keysym::XK_0,
        "1" => keysym::XK_1,
        "2" => keysym::XK_2,
        "3" => keysym::XK_3,
        "4" => keysym::XK_4,
        "5" => keysym::XK_5,
        "6" => keysym::XK_6,
        "7" => keysym::XK_7,
        "8" => keysym::XK_8,
        "9" => keysym::XK_9,
        // Latin 1
        "space" => keysym::XK_space,
        "exclam" => keysym::XK_exclam,
        "quotedbl" => keysym::XK_quotedbl,
        "numbersign" => keysym::XK_numbersign,
        "dollar" => keysym::XK_dollar,
        "percent" => keysym::XK_percent,
        "ampersand" => keysym::XK_ampersand,
        "apostrophe" => keysym::XK_apostrophe,
        "parenleft" => keysym::XK_parenleft,
        "parenright" => keysym::XK_parenright,
        "asterisk" => keysym::XK_asterisk,
        "plus" => keysym::XK_plus,
        "comma" => keysym::XK_comma,
        "minus" => keysym::XK_minus,
        "period" => keysym::XK_period,
        "slash" => keysym::XK_slash,
        "colon" => keysym::XK_colon,
        "semicolon" => keysym::XK_semicolon,
        "less" => keysym::XK_less,
        "equal" => keysym::XK_equal,
        "greater" => keysym::XK_greater,
        "question" => keysym::XK_question,
        "at" => keysym::XK_at,
        "bracketleft" => keysym::XK_bracketleft,
        "backslash" => keysym::XK_backslash,
        "bracketright" => keysym::XK_bracketright,
        "asciicircum" => keysym::XK_asciicircum,
        "underscore" => keysym::XK_underscore,
        "grave" => keysym::XK_grave,
        "braceleft" => keysym::XK_braceleft,
        "bar" => keysym::XK_bar,
        "braceright" => keysym::XK_braceright,
        "asciitilde" => keysym::XK_asciitilde,
        // TTY function keys
        "BackSpace" => keysym::XK_BackSpace,
        "Tab" => keysym::XK_Tab,
        "Linefeed" => keysym::XK_Linefeed,
        "Clear" => keysym::XK_Clear,
        "Return" => keysym::XK_Return,
        "Pause" => keysym::XK_Pause,
        "Scroll_Lock" => keysym::XK_Scroll_Lock,
        "Sys_Req" => keysym::XK_Sys_Req,
        "Escape" => keysym::XK_Escape,
        "Delete" => keysym::XK_Delete,
        // Cursor control
        "Home" => keysym::XK_Home,
        "Left" => keysym::XK_Left,
        "Up" => keysym::XK_Up,
        "Right" => keysym::XK_Right,
        "Down" => keysym::XK_Down,
        "Prior" => keysym::XK_Prior,
        "Page_Up" => keysym::XK_Page_Up,
        "Next" => keysym::XK_Next,
        "Page_Down" => keysym::XK_Page_Down,
        "End" => keysym::XK_End,
        "Begin" => keysym::XK_Begin,
        // Misc functions
        "Select" => keysym::XK_Select,
        "Print" => keysym::XK_Print,
        "Execute" => keysym::XK_Execute,
        "Insert" => keysym::XK_Insert,
        "Undo" => keysym::XK_Undo,
        "Redo" => keysym::XK_Redo,
        "Menu" => keysym::XK_Menu,
        "Find" => keysym::XK_Find,
        "Cancel" => keysym::XK_Cancel,
        "Help" => keysym::XK_Help,
        "Break" => keysym::XK_Break,
        "Mode_switch" => keysym::XK_Mode_switch,
        "Num_Lock" => keysym::XK_Num_Lock,
        // Keypad
        "KP_Space" => keysym::XK_KP_Space,
        "KP_Tab" => keysym::XK_KP_Tab,
        "KP_Enter" => keysym::XK_KP_Enter,
        "KP_F1" => keysym::XK_KP_F1,
        "KP_F2" => keysym::XK_KP_F2,
        "KP_F3" => keysym::XK_KP_F3,
        "KP_F4" => keysym::XK_KP_F4,
        "KP_Home" => keysym::XK_KP_Home,
        "KP_Left" => keysym::XK_KP_Left,
        "KP_Up" => keysym::XK_KP_Up,
        "KP_Right" => keysym::XK_KP_Right,
        "KP_Down" => keysym::XK_KP_Down,
        "KP_Prior" => keysym::XK_KP_Prior,
        "KP_Page_Up" => keysym::XK_KP_Page_Up,
        "KP_Next" => keysym::XK_KP_Next,
        "KP_Page_Down" => keysym::XK_KP_Page_Down,
        "KP_End" => keysym::XK_KP_End,
        "KP_Begin" => keysym::XK_KP_Begin,
        "KP_Insert" => keysym::XK_KP_Insert,
        "KP_Delete" => keysym::XK_KP_Delete,
        "KP_Equal" => keysym::XK_KP_Equal,
        "KP_Multiply" => keysym::XK_KP_Multiply,
        "KP_Add" => keysym::XK_KP_Add,
        "KP_Separator" => keysym::XK_KP_Separator,
        "KP_Subtract" => keysym::XK_KP_Subtract,
        "KP_Decimal" => keysym::XK_KP_Decimal,
        "KP_Divide" => keysym::XK_KP_Divide,
        "KP_0" => keysym::XK_KP_0,
        "KP_1" => keysym::XK_KP_1,
        "KP_2" => keysym::XK_KP_2,
        "KP_3" => keysym::XK_KP_3,
        "KP_4" => keysym::XK_KP_4,
        "KP_5" => keysym::XK_KP_5,
        "KP_6" => keysym::XK_KP_6,
        "KP_7" => keysym::XK_KP_7,
        "KP_8" => keysym::XK_KP_8,
        "KP_9" => keysym::XK_KP_9,
        // Function keys
        "F1" => keysym::XK_F1,
        "F2" => keysym::XK_F2,
        "F3" => keysym::XK_F3,
        "F4" => keysym::XK_F4,
        "F5" => keysym::XK_F5,
        "F6" => keysym::XK_F6,
        "F7" => keysym::XK_F7,
        "F8" => keysym::XK_F8,
        "F9" => keysym::XK_F9,
        "F10" => keysym::XK_F10,
        "F11" => keysym::XK_F11,
        "F12" => keysym::XK_F12,
        "F13" => keysym::XK_F13,
        "F14" => keysym::XK_F14,
        "F15" => keysym::XK_F15,
        "F16" => keysym::XK_F16,
        "F17" => keysym::XK_F17,
        "F18" => keysym::XK_F18,
        "F19" => keysym::XK_F19,
        "F20" => keysym::XK_F20,
        "F21" => keysym::XK_F21,
        "F22" => keysym::XK_F22,
        "F23" => keysym::XK_F23,
        "F24" => keysym::XK_F24,
        // Modifiers
        "Shift_L" => keysym::XK_Shift_L,
        "Shift_R" => keysym::XK_Shift_R,
        "Control_L" => keysym::XK_Control_L,
        "Control_R" => keysym::XK_Control_R,
        "Caps_Lock" => keysym::XK_Caps_Lock,
        "Shift_Lock" => keysym::XK_Shift_Lock,
        "Meta_L" => keysym::XK_Meta_L,
        "Meta_R" => keysym::XK_Meta_R,
        "Alt_L" => keysym::XK_Alt_L,
        "Alt_R" => keysym::XK_Alt_R,
        "Super_L" => keysym::XK_Super_L,
        "Super_R" => keysym::XK_Super_R,
        "Hyper_L" => keysym::XK_Hyper_L,
        "Hyper_R" => keysym::XK_Hyper_R,
        // Vendor multimedia keys
        "XF86AudioLowerVolume" => keysym::XF86XK_AudioLowerVolume,
        "XF86AudioMute" => keysym::XF86XK_AudioMute,
        "XF86AudioRaiseVolume" => keysym::XF86XK_AudioRaiseVolume,
        "XF86AudioPlay" => keysym::XF86XK_AudioPlay,
        "XF86AudioStop" => keysym::XF86XK_AudioStop,
        "XF86AudioPrev" => keysym::XF86XK_AudioPrev,
        "XF86AudioNext" => keysym::XF86XK_AudioNext,
        "XF86AudioPause" => keysym::XF86XK_AudioPause,
        "XF86MonBrightnessUp" => keysym::XF86XK_MonBrightnessUp,
        "XF86MonBrightnessDown" => keysym::XF86XK_MonBrightnessDown,
        "XF86KbdBrightnessUp" => keysym::XF86XK_KbdBrightnessUp,
        "XF86KbdBrightnessDown" => keysym::XF86XK_KbdBrightnessDown,
        "XF86Calculator" => keysym::XF86XK_Calculator,
        "XF86Mail" => keysym::XF86XK_Mail,
        "XF86WWW" => keysym::XF86XK_WWW,
        "XF86HomePage" => keysym::XF86XK_HomePage,
        "XF86Search" => keysym::XF86XK_Search,
        "XF86Sleep" => keysym::XF86XK_Sleep,
        "XF86PowerOff" => keysym::XF86XK_PowerOff,
        "XF86Eject" => keysym::XF86XK_Eject,
        "XF86ScreenSaver" => keysym::XF86XK_ScreenSaver,
        _ => return None,
    };
    Some(sym)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits_map_to_their_latin1_keysym() {
        assert_eq!(into_keysym("q"), Some(0x71));
        assert_eq!(into_keysym("Q"), Some(0x71));
        assert_eq!(into_keysym("1"), Some(0x31));
    }

    #[test]
    fn function_and_named_keys_are_found() {
        assert_eq!(into_keysym("F1"), Some(0xffbe));
        assert_eq!(into_keysym("F12"), Some(0xffc9));
        assert_eq!(into_keysym("Return"), Some(0xff0d));
        assert_eq!(into_keysym("F25"), None);
        assert_eq!(into_keysym("NotAKey"), None);
    }

    #[test]
    fn punctuation_keypad_and_media_keys_are_found() {
        assert_eq!(into_keysym("bracketleft"), Some(0x5b));
        assert_eq!(into_keysym("grave"), Some(0x60));
        assert_eq!(into_keysym("apostrophe"), Some(0x27));
        assert_eq!(into_keysym("backslash"), Some(0x5c));
        assert_eq!(into_keysym("KP_Enter"), Some(0xff8d));
        assert_eq!(into_keysym("Insert"), Some(0xff63));
        assert_eq!(into_keysym("Menu"), Some(0xff67));
        assert_eq!(into_keysym("XF86AudioMute"), Some(0x1008_ff12));
    }
}
