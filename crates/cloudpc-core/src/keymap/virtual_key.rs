//! The injectable key-code space: every Windows Virtual-Key code the input
//! simulator accepts, keyed by its `winuser.h` name without the `VK_` prefix
//! (letters and digits keep it: `VK_A`, `VK_0`).
//!
//! # Why names, not numbers?
//!
//! The relay forwards DOM key names (`"Enter"`, `"ArrowLeft"`, `"a"`).  The
//! translation table in [`super`] normalises those into the spelling used
//! here and then looks the result up by name.  A name that is not in
//! [`VIRTUAL_KEY_NAMES`] is not injectable, so this table alone defines which
//! keys are valid.
//!
//! Some codes have more than one name (`KANA`/`HANGUL`, `HANJA`/`KANJI`).
//! Every alias is listed; [`VirtualKeyCode::name`] returns the first one.
//!
//! Reference: https://learn.microsoft.com/windows/win32/inputdev/virtual-key-codes

/// Declares [`VirtualKeyCode`] and [`VIRTUAL_KEY_NAMES`] from a single list so
/// the enum and the name table cannot drift apart.
macro_rules! virtual_key_codes {
    (@first $first:literal $(, $rest:literal)*) => {
        $first
    };
    ($( $variant:ident = $code:literal => [$($name:literal),+ $(,)?] ),+ $(,)?) => {
        /// A Windows Virtual-Key code.
        ///
        /// The discriminant is the numeric VK value passed to `SendInput`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum VirtualKeyCode {
            $( $variant = $code, )+
        }

        /// Every injectable key name paired with its code, aliases included.
        pub const VIRTUAL_KEY_NAMES: &[(&str, VirtualKeyCode)] = &[
            $( $( ($name, VirtualKeyCode::$variant), )+ )+
        ];

        impl VirtualKeyCode {
            /// Returns the canonical name of this code (e.g. `"RETURN"`, `"VK_A"`).
            pub fn name(self) -> &'static str {
                match self {
                    $( VirtualKeyCode::$variant => virtual_key_codes!(@first $($name),+), )+
                }
            }
        }
    };
}

virtual_key_codes! {
    LButton = 0x01 => ["LBUTTON"],
    RButton = 0x02 => ["RBUTTON"],
    Cancel = 0x03 => ["CANCEL"],
    MButton = 0x04 => ["MBUTTON"],
    XButton1 = 0x05 => ["XBUTTON1"],
    XButton2 = 0x06 => ["XBUTTON2"],

    Back = 0x08 => ["BACK"],
    Tab = 0x09 => ["TAB"],
    Clear = 0x0C => ["CLEAR"],
    Return = 0x0D => ["RETURN"],
    Shift = 0x10 => ["SHIFT"],
    Control = 0x11 => ["CONTROL"],
    Menu = 0x12 => ["MENU"],
    Pause = 0x13 => ["PAUSE"],
    Capital = 0x14 => ["CAPITAL"],
    Kana = 0x15 => ["KANA", "HANGEUL", "HANGUL"],
    Junja = 0x17 => ["JUNJA"],
    Final = 0x18 => ["FINAL"],
    Hanja = 0x19 => ["HANJA", "KANJI"],
    Escape = 0x1B => ["ESCAPE"],
    Convert = 0x1C => ["CONVERT"],
    NonConvert = 0x1D => ["NONCONVERT"],
    Accept = 0x1E => ["ACCEPT"],
    ModeChange = 0x1F => ["MODECHANGE"],

    Space = 0x20 => ["SPACE"],
    Prior = 0x21 => ["PRIOR"],
    Next = 0x22 => ["NEXT"],
    End = 0x23 => ["END"],
    Home = 0x24 => ["HOME"],
    Left = 0x25 => ["LEFT"],
    Up = 0x26 => ["UP"],
    Right = 0x27 => ["RIGHT"],
    Down = 0x28 => ["DOWN"],
    Select = 0x29 => ["SELECT"],
    Print = 0x2A => ["PRINT"],
    Execute = 0x2B => ["EXECUTE"],
    Snapshot = 0x2C => ["SNAPSHOT"],
    Insert = 0x2D => ["INSERT"],
    Delete = 0x2E => ["DELETE"],
    Help = 0x2F => ["HELP"],

    Vk0 = 0x30 => ["VK_0"],
    Vk1 = 0x31 => ["VK_1"],
    Vk2 = 0x32 => ["VK_2"],
    Vk3 = 0x33 => ["VK_3"],
    Vk4 = 0x34 => ["VK_4"],
    Vk5 = 0x35 => ["VK_5"],
    Vk6 = 0x36 => ["VK_6"],
    Vk7 = 0x37 => ["VK_7"],
    Vk8 = 0x38 => ["VK_8"],
    Vk9 = 0x39 => ["VK_9"],

    VkA = 0x41 => ["VK_A"],
    VkB = 0x42 => ["VK_B"],
    VkC = 0x43 => ["VK_C"],
    VkD = 0x44 => ["VK_D"],
    VkE = 0x45 => ["VK_E"],
    VkF = 0x46 => ["VK_F"],
    VkG = 0x47 => ["VK_G"],
    VkH = 0x48 => ["VK_H"],
    VkI = 0x49 => ["VK_I"],
    VkJ = 0x4A => ["VK_J"],
    VkK = 0x4B => ["VK_K"],
    VkL = 0x4C => ["VK_L"],
    VkM = 0x4D => ["VK_M"],
    VkN = 0x4E => ["VK_N"],
    VkO = 0x4F => ["VK_O"],
    VkP = 0x50 => ["VK_P"],
    VkQ = 0x51 => ["VK_Q"],
    VkR = 0x52 => ["VK_R"],
    VkS = 0x53 => ["VK_S"],
    VkT = 0x54 => ["VK_T"],
    VkU = 0x55 => ["VK_U"],
    VkV = 0x56 => ["VK_V"],
    VkW = 0x57 => ["VK_W"],
    VkX = 0x58 => ["VK_X"],
    VkY = 0x59 => ["VK_Y"],
    VkZ = 0x5A => ["VK_Z"],

    LWin = 0x5B => ["LWIN"],
    RWin = 0x5C => ["RWIN"],
    Apps = 0x5D => ["APPS"],
    Sleep = 0x5F => ["SLEEP"],

    Numpad0 = 0x60 => ["NUMPAD0"],
    Numpad1 = 0x61 => ["NUMPAD1"],
    Numpad2 = 0x62 => ["NUMPAD2"],
    Numpad3 = 0x63 => ["NUMPAD3"],
    Numpad4 = 0x64 => ["NUMPAD4"],
    Numpad5 = 0x65 => ["NUMPAD5"],
    Numpad6 = 0x66 => ["NUMPAD6"],
    Numpad7 = 0x67 => ["NUMPAD7"],
    Numpad8 = 0x68 => ["NUMPAD8"],
    Numpad9 = 0x69 => ["NUMPAD9"],
    Multiply = 0x6A => ["MULTIPLY"],
    Add = 0x6B => ["ADD"],
    Separator = 0x6C => ["SEPARATOR"],
    Subtract = 0x6D => ["SUBTRACT"],
    Decimal = 0x6E => ["DECIMAL"],
    Divide = 0x6F => ["DIVIDE"],

    F1 = 0x70 => ["F1"],
    F2 = 0x71 => ["F2"],
    F3 = 0x72 => ["F3"],
    F4 = 0x73 => ["F4"],
    F5 = 0x74 => ["F5"],
    F6 = 0x75 => ["F6"],
    F7 = 0x76 => ["F7"],
    F8 = 0x77 => ["F8"],
    F9 = 0x78 => ["F9"],
    F10 = 0x79 => ["F10"],
    F11 = 0x7A => ["F11"],
    F12 = 0x7B => ["F12"],
    F13 = 0x7C => ["F13"],
    F14 = 0x7D => ["F14"],
    F15 = 0x7E => ["F15"],
    F16 = 0x7F => ["F16"],
    F17 = 0x80 => ["F17"],
    F18 = 0x81 => ["F18"],
    F19 = 0x82 => ["F19"],
    F20 = 0x83 => ["F20"],
    F21 = 0x84 => ["F21"],
    F22 = 0x85 => ["F22"],
    F23 = 0x86 => ["F23"],
    F24 = 0x87 => ["F24"],

    Numlock = 0x90 => ["NUMLOCK"],
    Scroll = 0x91 => ["SCROLL"],
    LShift = 0xA0 => ["LSHIFT"],
    RShift = 0xA1 => ["RSHIFT"],
    LControl = 0xA2 => ["LCONTROL"],
    RControl = 0xA3 => ["RCONTROL"],
    LMenu = 0xA4 => ["LMENU"],
    RMenu = 0xA5 => ["RMENU"],

    BrowserBack = 0xA6 => ["BROWSER_BACK"],
    BrowserForward = 0xA7 => ["BROWSER_FORWARD"],
    BrowserRefresh = 0xA8 => ["BROWSER_REFRESH"],
    BrowserStop = 0xA9 => ["BROWSER_STOP"],
    BrowserSearch = 0xAA => ["BROWSER_SEARCH"],
    BrowserFavorites = 0xAB => ["BROWSER_FAVORITES"],
    BrowserHome = 0xAC => ["BROWSER_HOME"],
    VolumeMute = 0xAD => ["VOLUME_MUTE"],
    VolumeDown = 0xAE => ["VOLUME_DOWN"],
    VolumeUp = 0xAF => ["VOLUME_UP"],
    MediaNextTrack = 0xB0 => ["MEDIA_NEXT_TRACK"],
    MediaPrevTrack = 0xB1 => ["MEDIA_PREV_TRACK"],
    MediaStop = 0xB2 => ["MEDIA_STOP"],
    MediaPlayPause = 0xB3 => ["MEDIA_PLAY_PAUSE"],
    LaunchMail = 0xB4 => ["LAUNCH_MAIL"],
    LaunchMediaSelect = 0xB5 => ["LAUNCH_MEDIA_SELECT"],
    LaunchApp1 = 0xB6 => ["LAUNCH_APP1"],
    LaunchApp2 = 0xB7 => ["LAUNCH_APP2"],

    Oem1 = 0xBA => ["OEM_1"],
    OemPlus = 0xBB => ["OEM_PLUS"],
    OemComma = 0xBC => ["OEM_COMMA"],
    OemMinus = 0xBD => ["OEM_MINUS"],
    OemPeriod = 0xBE => ["OEM_PERIOD"],
    Oem2 = 0xBF => ["OEM_2"],
    Oem3 = 0xC0 => ["OEM_3"],
    Oem4 = 0xDB => ["OEM_4"],
    Oem5 = 0xDC => ["OEM_5"],
    Oem6 = 0xDD => ["OEM_6"],
    Oem7 = 0xDE => ["OEM_7"],
    Oem8 = 0xDF => ["OEM_8"],
    Oem102 = 0xE2 => ["OEM_102"],

    ProcessKey = 0xE5 => ["PROCESSKEY"],
    Packet = 0xE7 => ["PACKET"],
    Attn = 0xF6 => ["ATTN"],
    Crsel = 0xF7 => ["CRSEL"],
    Exsel = 0xF8 => ["EXSEL"],
    Ereof = 0xF9 => ["EREOF"],
    Play = 0xFA => ["PLAY"],
    Zoom = 0xFB => ["ZOOM"],
    Noname = 0xFC => ["NONAME"],
    Pa1 = 0xFD => ["PA1"],
    OemClear = 0xFE => ["OEM_CLEAR"],
}

impl VirtualKeyCode {
    /// Looks up a key code by its injectable name.
    ///
    /// The match is exact and case-sensitive: callers are expected to have
    /// normalised the name already (see [`super::translate`]).
    pub fn from_name(name: &str) -> Option<Self> {
        // Linear scan over ~180 entries; this runs once per key event.
        VIRTUAL_KEY_NAMES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|&(_, code)| code)
    }

    /// Returns the raw Virtual-Key value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns `true` for codes that need `KEYEVENTF_EXTENDEDKEY` when injected.
    pub fn is_extended(self) -> bool {
        matches!(
            self,
            VirtualKeyCode::Prior
                | VirtualKeyCode::Next
                | VirtualKeyCode::End
                | VirtualKeyCode::Home
                | VirtualKeyCode::Left
                | VirtualKeyCode::Up
                | VirtualKeyCode::Right
                | VirtualKeyCode::Down
                | VirtualKeyCode::Insert
                | VirtualKeyCode::Delete
                | VirtualKeyCode::LWin
                | VirtualKeyCode::RWin
                | VirtualKeyCode::Apps
                | VirtualKeyCode::Divide
                | VirtualKeyCode::Numlock
                | VirtualKeyCode::RControl
                | VirtualKeyCode::RMenu
        )
    }
}
