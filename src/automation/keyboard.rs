//! Keyboard input simulation.
//!
//! Hotkeys and typed text are turned into a flat list of key strokes first,
//! then handed to a [`Keyboard`]; [`SystemKeyboard`] sends them with SendInput. Typed characters go through KEYEVENTF_UNICODE so
//! the active keyboard layout does not matter; newlines are sent as Enter.

use anyhow::Result;
use std::thread::sleep;
use std::time::Duration;

/// Pause after every hotkey so the target window can react.
const SETTLE_DELAY: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Control,
    Alt,
    Tab,
    Enter,
    /// An ASCII letter, sent by its virtual-key code.
    Letter(char),
}

#[cfg(windows)]
impl Key {
    pub fn virtual_key(self) -> u16 {
        match self {
            Key::Control => 0x11, // VK_CONTROL
            Key::Alt => 0x12,     // VK_MENU
            Key::Tab => 0x09,     // VK_TAB
            Key::Enter => 0x0D,   // VK_RETURN
            Key::Letter(c) => c.to_ascii_uppercase() as u16,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stroke {
    Down(Key),
    Up(Key),
    /// One UTF-16 code unit typed as a unicode key press + release.
    Unit(u16),
}

/// Presses `keys` in order and releases them in reverse.
pub fn hotkey_strokes(keys: &[Key]) -> Vec<Stroke> {
    keys.iter()
        .map(|&k| Stroke::Down(k))
        .chain(keys.iter().rev().map(|&k| Stroke::Up(k)))
        .collect()
}

/// Strokes for one typed character.
pub fn char_strokes(c: char) -> Vec<Stroke> {
    if c == '\n' {
        return hotkey_strokes(&[Key::Enter]);
    }
    let mut buf = [0u16; 2];
    c.encode_utf16(&mut buf).iter().map(|&u| Stroke::Unit(u)).collect()
}

/// Destination of key strokes.
pub trait Keyboard {
    fn send(&mut self, strokes: &[Stroke]) -> Result<()>;

    fn pause(&mut self, duration: Duration);
}

/// The real keyboard of the interactive session.
pub struct SystemKeyboard;

impl Keyboard for SystemKeyboard {
    fn send(&mut self, strokes: &[Stroke]) -> Result<()> {
        sys::send(strokes)
    }

    fn pause(&mut self, duration: Duration) {
        sleep(duration);
    }
}

/// Presses a key combination such as Ctrl+S.
pub fn press_hotkey(keyboard: &mut dyn Keyboard, keys: &[Key]) -> Result<()> {
    tracing::debug!("Hotkey {:?}", keys);
    keyboard.send(&hotkey_strokes(keys))?;
    keyboard.pause(SETTLE_DELAY);
    Ok(())
}

/// Types `text` one character at a time with `interval` between characters.
pub fn type_text(keyboard: &mut dyn Keyboard, text: &str, interval: Duration) -> Result<()> {
    for c in text.chars() {
        keyboard.send(&char_strokes(c))?;
        keyboard.pause(interval);
    }
    keyboard.pause(SETTLE_DELAY);
    Ok(())
}

#[cfg(windows)]
mod sys {
    use super::Stroke;
    use anyhow::{anyhow, Result};
    use windows::Win32::UI::Input::KeyboardAndMouse::{
        SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYBD_EVENT_FLAGS,
        KEYEVENTF_KEYUP, KEYEVENTF_UNICODE, VIRTUAL_KEY,
    };

    fn key_input(vk: u16, scan: u16, flags: KEYBD_EVENT_FLAGS) -> INPUT {
        INPUT {
            r#type: INPUT_KEYBOARD,
            Anonymous: INPUT_0 {
                ki: KEYBDINPUT {
                    wVk: VIRTUAL_KEY(vk),
                    wScan: scan,
                    dwFlags: flags,
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        }
    }

    pub fn send(strokes: &[Stroke]) -> Result<()> {
        let mut inputs = Vec::with_capacity(strokes.len() * 2);
        for stroke in strokes {
            match *stroke {
                Stroke::Down(key) => {
                    inputs.push(key_input(key.virtual_key(), 0, KEYBD_EVENT_FLAGS(0)))
                }
                Stroke::Up(key) => inputs.push(key_input(key.virtual_key(), 0, KEYEVENTF_KEYUP)),
                Stroke::Unit(unit) => {
                    inputs.push(key_input(0, unit, KEYEVENTF_UNICODE));
                    inputs.push(key_input(0, unit, KEYEVENTF_UNICODE | KEYEVENTF_KEYUP));
                }
            }
        }

        let sent = unsafe { SendInput(&inputs, std::mem::size_of::<INPUT>() as i32) };
        if sent as usize != inputs.len() {
            return Err(anyhow!(
                "SendInput delivered {} of {} inputs",
                sent,
                inputs.len()
            ));
        }
        Ok(())
    }
}

#[cfg(not(windows))]
mod sys {
    use super::Stroke;
    use anyhow::{anyhow, Result};

    pub fn send(_strokes: &[Stroke]) -> Result<()> {
        Err(anyhow!("Keyboard automation is only supported on Windows"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotkey_releases_in_reverse() {
        assert_eq!(
            hotkey_strokes(&[Key::Control, Key::Letter('s')]),
            vec![
                Stroke::Down(Key::Control),
                Stroke::Down(Key::Letter('s')),
                Stroke::Up(Key::Letter('s')),
                Stroke::Up(Key::Control),
            ]
        );
    }

    #[cfg(windows)]
    #[test]
    fn test_letter_virtual_key_is_uppercase_ascii() {
        assert_eq!(Key::Letter('n').virtual_key(), 0x4E);
        assert_eq!(Key::Letter('S').virtual_key(), 0x53);
    }

    #[test]
    fn test_newline_is_enter() {
        assert_eq!(
            char_strokes('\n'),
            vec![Stroke::Down(Key::Enter), Stroke::Up(Key::Enter)]
        );
    }

    #[derive(Default)]
    struct Recorder {
        strokes: Vec<Stroke>,
        paused: Duration,
    }

    impl Keyboard for Recorder {
        fn send(&mut self, strokes: &[Stroke]) -> Result<()> {
            self.strokes.extend_from_slice(strokes);
            Ok(())
        }

        fn pause(&mut self, duration: Duration) {
            self.paused += duration;
        }
    }

    #[test]
    fn test_type_text_waits_between_characters() {
        let mut keyboard = Recorder::default();
        type_text(&mut keyboard, "a\n", Duration::from_millis(10)).unwrap();

        assert_eq!(
            keyboard.strokes,
            vec![
                Stroke::Unit('a' as u16),
                Stroke::Down(Key::Enter),
                Stroke::Up(Key::Enter),
            ]
        );
        assert_eq!(keyboard.paused, Duration::from_millis(20) + SETTLE_DELAY);
    }

    #[test]
    fn test_cyrillic_is_single_unit() {
        assert_eq!(char_strokes('Б'), vec![Stroke::Unit(0x0411)]);
    }

    #[test]
    fn test_astral_char_is_surrogate_pair() {
        assert_eq!(
            char_strokes('🂡'),
            vec![Stroke::Unit(0xD83C), Stroke::Unit(0xDCA1)]
        );
    }
}
