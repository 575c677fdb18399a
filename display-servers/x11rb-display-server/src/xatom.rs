use x11rb::atom_manager;

atom_manager! {
    /// The atoms nyla needs beyond the predefined ones.
    pub AtomCollection:

    /// A handle to a response from the X11 server.
    AtomCollectionCookie {
        WMProtocols: b"WM_PROTOCOLS" as &[u8],
        WMDelete: b"WM_DELETE_WINDOW",
        WMTakeFocus: b"WM_TAKE_FOCUS",
        UTF8String: b"UTF8_STRING",
        CompoundText: b"COMPOUND_TEXT",
    }
}
