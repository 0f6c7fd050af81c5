//! Windows input simulation via the SendInput API.
//!
//! Pointer positions arrive already normalised to the `[0, 65535]` absolute
//! space of the primary monitor, which is exactly what `MOUSEEVENTF_ABSOLUTE`
//! expects.  Text goes through `KEYEVENTF_UNICODE` so it does not depend on
//! the host's keyboard layout.  A modified stroke is sent as one batch so no
//! other input can interleave between the modifier presses and releases.

#![cfg(target_os = "windows")]

use cloudpc_core::{AbsolutePoint, ModifierSet, MouseButton, VirtualKeyCode};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, INPUT_MOUSE, KEYBDINPUT, KEYBD_EVENT_FLAGS,
    KEYEVENTF_EXTENDEDKEY, KEYEVENTF_KEYUP, KEYEVENTF_UNICODE, MOUSEEVENTF_ABSOLUTE,
    MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP, MOUSEEVENTF_MOVE, MOUSEEVENTF_RIGHTDOWN,
    MOUSEEVENTF_RIGHTUP, MOUSEINPUT, MOUSE_EVENT_FLAGS, VIRTUAL_KEY,
};

use crate::application::inject_input::{InjectionError, InputSimulator};

/// Windows implementation of [`InputSimulator`] using SendInput.
#[derive(Default)]
pub struct WindowsInputSimulator;

impl WindowsInputSimulator {
    pub fn new() -> Self {
        Self
    }
}

impl InputSimulator for WindowsInputSimulator {
    fn move_to(&self, point: AbsolutePoint) -> Result<(), InjectionError> {
        send(&[mouse_input(
            i32::from(point.x),
            i32::from(point.y),
            MOUSEEVENTF_ABSOLUTE | MOUSEEVENTF_MOVE,
        )])
    }

    fn button_down(&self, button: MouseButton) -> Result<(), InjectionError> {
        let flags = match button {
            MouseButton::Left => MOUSEEVENTF_LEFTDOWN,
            MouseButton::Right => MOUSEEVENTF_RIGHTDOWN,
        };
        send(&[mouse_input(0, 0, flags)])
    }

    fn button_up(&self, button: MouseButton) -> Result<(), InjectionError> {
        let flags = match button {
            MouseButton::Left => MOUSEEVENTF_LEFTUP,
            MouseButton::Right => MOUSEEVENTF_RIGHTUP,
        };
        send(&[mouse_input(0, 0, flags)])
    }

    fn text_entry(&self, ch: char) -> Result<(), InjectionError> {
        let mut buf = [0u16; 2];
        let units = ch.encode_utf16(&mut buf);

        let mut inputs: Vec<INPUT> = units.iter().map(|&u| unicode_input(u, false)).collect();
        inputs.extend(units.iter().map(|&u| unicode_input(u, true)));
        send(&inputs)
    }

    fn modified_key_stroke(
        &self,
        code: VirtualKeyCode,
        modifiers: ModifierSet,
    ) -> Result<(), InjectionError> {
        let mut inputs: Vec<INPUT> = modifiers.codes().map(|m| key_input(m, false)).collect();
        inputs.push(key_input(code, false));
        inputs.push(key_input(code, true));
        inputs.extend(modifiers.codes().rev().map(|m| key_input(m, true)));
        send(&inputs)
    }
}

fn send(inputs: &[INPUT]) -> Result<(), InjectionError> {
    // SAFETY: every element is a fully initialised INPUT and cbsize matches
    // the element type.
    let sent = unsafe { SendInput(inputs, std::mem::size_of::<INPUT>() as i32) };
    if sent as usize != inputs.len() {
        return Err(InjectionError::Rejected(format!(
            "SendInput injected {sent} of {} events: {}",
            inputs.len(),
            windows::core::Error::from_win32()
        )));
    }
    Ok(())
}

fn mouse_input(dx: i32, dy: i32, flags: MOUSE_EVENT_FLAGS) -> INPUT {
    INPUT {
        r#type: INPUT_MOUSE,
        Anonymous: INPUT_0 {
            mi: MOUSEINPUT {
                dx,
                dy,
                mouseData: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

fn key_input(code: VirtualKeyCode, key_up: bool) -> INPUT {
    let mut flags = KEYBD_EVENT_FLAGS(0);
    if key_up {
        flags |= KEYEVENTF_KEYUP;
    }
    if code.is_extended() {
        flags |= KEYEVENTF_EXTENDEDKEY;
    }
    keyboard_input(VIRTUAL_KEY(u16::from(code.as_u8())), 0, flags)
}

fn unicode_input(unit: u16, key_up: bool) -> INPUT {
    let mut flags = KEYEVENTF_UNICODE;
    if key_up {
        flags |= KEYEVENTF_KEYUP;
    }
    keyboard_input(VIRTUAL_KEY(0), unit, flags)
}

fn keyboard_input(vk: VIRTUAL_KEY, scan: u16, flags: KEYBD_EVENT_FLAGS) -> INPUT {
    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: vk,
                wScan: scan,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}
