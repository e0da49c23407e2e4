//! Host-side test doubles: a recording display bus with a small HD44780
//! model behind it, and a scripted button source.

use std::cell::{Ref, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use warden_hal::{LcdBus, RegisterSelect};

use crate::display::cmd;
use crate::input::{Button, ButtonSnapshot, Buttons};

/// One transfer on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusOp {
    Write(RegisterSelect, u8),
    Delay(u32),
}

/// Display RAM model of a 2x40 HD44780
#[derive(Debug, Clone)]
pub struct DisplayModel {
    ddram: [[u8; 40]; 2],
    line: usize,
    column: usize,
    shift: i32,
    clears: usize,
}

impl DisplayModel {
    fn new() -> Self {
        Self {
            ddram: [[b' '; 40]; 2],
            line: 0,
            column: 0,
            shift: 0,
            clears: 0,
        }
    }

    fn apply(&mut self, register: RegisterSelect, byte: u8) {
        match register {
            RegisterSelect::Instruction => match byte {
                cmd::CLEAR_DISPLAY => {
                    self.ddram = [[b' '; 40]; 2];
                    self.line = 0;
                    self.column = 0;
                    self.shift = 0;
                    self.clears += 1;
                }
                cmd::SHIFT_DISPLAY_LEFT => self.shift += 1,
                cmd::SHIFT_DISPLAY_RIGHT => self.shift -= 1,
                b if b & cmd::SET_DDRAM_ADDR != 0 => {
                    let addr = b & !cmd::SET_DDRAM_ADDR;
                    self.line = usize::from(addr >= cmd::LINE_1_OFFSET);
                    self.column = usize::from(addr & 0x3F).min(39);
                }
                _ => {}
            },
            RegisterSelect::Data => {
                if self.column < 40 {
                    self.ddram[self.line][self.column] = byte;
                    self.column += 1;
                }
            }
        }
    }

    /// Full contents of a line, trailing blanks trimmed
    pub fn line(&self, line: usize) -> String {
        let text: String = self.ddram[line].iter().map(|&b| b as char).collect();
        String::from(text.trim_end())
    }

    /// Number of clear-display commands seen
    pub fn clears(&self) -> usize {
        self.clears
    }

    /// Net display shift (positive = view moved right)
    pub fn shift(&self) -> i32 {
        self.shift
    }
}

#[derive(Debug)]
struct Recorder {
    ops: Vec<BusOp>,
    display: DisplayModel,
}

/// Display bus that records every transfer
///
/// Clones share the same recording, so a test can keep a handle while the
/// `Lcd` owns another.
#[derive(Debug, Clone)]
pub struct RecordingBus {
    inner: Rc<RefCell<Recorder>>,
}

impl RecordingBus {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Recorder {
                ops: Vec::new(),
                display: DisplayModel::new(),
            })),
        }
    }

    /// Every transfer so far
    pub fn ops(&self) -> Vec<BusOp> {
        self.inner.borrow().ops.clone()
    }

    /// Bytes written to the data register
    pub fn data_bytes(&self) -> Vec<u8> {
        self.inner
            .borrow()
            .ops
            .iter()
            .filter_map(|op| match op {
                BusOp::Write(RegisterSelect::Data, b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    /// Current display model
    pub fn display(&self) -> Ref<'_, DisplayModel> {
        Ref::map(self.inner.borrow(), |r| &r.display)
    }

    /// Both lines as currently shown
    pub fn screen(&self) -> [String; 2] {
        let display = self.display();
        [display.line(0), display.line(1)]
    }
}

impl LcdBus for RecordingBus {
    fn write(&mut self, register: RegisterSelect, byte: u8) {
        let mut inner = self.inner.borrow_mut();
        inner.ops.push(BusOp::Write(register, byte));
        inner.display.apply(register, byte);
    }

    fn delay_us(&mut self, us: u32) {
        self.inner.borrow_mut().ops.push(BusOp::Delay(us));
    }
}

/// Button source that replays a fixed script
///
/// Each `snapshot()` consumes one frame. Whenever a frame reports a press,
/// the screen on the watched bus is captured, so tests can assert on what
/// the user was looking at when they pressed.
pub struct ScriptedButtons {
    frames: RefCell<VecDeque<ButtonSnapshot>>,
    watch: Option<RecordingBus>,
    screens: RefCell<Vec<[String; 2]>>,
}

impl ScriptedButtons {
    /// Replay raw frames
    pub fn new(frames: impl IntoIterator<Item = ButtonSnapshot>) -> Self {
        Self {
            frames: RefCell::new(frames.into_iter().collect()),
            watch: None,
            screens: RefCell::new(Vec::new()),
        }
    }

    /// One release-then-press pair per entry
    pub fn presses(presses: &[Button]) -> Self {
        Self::new(
            presses
                .iter()
                .flat_map(|&b| [ButtonSnapshot::RELEASED, ButtonSnapshot::pressed(b)]),
        )
    }

    /// Capture the screen on `bus` at every press
    pub fn watching(mut self, bus: &RecordingBus) -> Self {
        self.watch = Some(bus.clone());
        self
    }

    /// Screens captured at each press, in order
    pub fn screens(&self) -> Vec<[String; 2]> {
        self.screens.borrow().clone()
    }

    /// Frames not yet consumed
    pub fn remaining(&self) -> usize {
        self.frames.borrow().len()
    }
}

impl Buttons for ScriptedButtons {
    fn snapshot(&self) -> ButtonSnapshot {
        let frame = self
            .frames
            .borrow_mut()
            .pop_front()
            .expect("button script exhausted");
        if frame.press().is_some() {
            if let Some(bus) = &self.watch {
                self.screens.borrow_mut().push(bus.screen());
            }
        }
        frame
    }
}
