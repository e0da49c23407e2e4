//! Confirmation workflow
//!
//! Turns an "ask the user" request into one or more screens and a single
//! verdict. Every request starts and ends on a cleared display, and every
//! screen waits for both buttons to be released before it accepts a press,
//! so a button still held from the previous screen is never counted twice.
//!
//! Waiting is a plain busy-poll on the debounced button flags. There is no
//! timeout: a screen stays up until a human presses something.

use warden_hal::LcdBus;

use crate::display::{Lcd, Line};
use crate::input::{Button, Buttons};
use crate::staging::Staging;

// Review screen text
const SENDING_PREFIX: &str = "Sending ";
const SENDING_SUFFIX: &str = " BTC to";
const FEE_HEADING: &str = "Transaction fee:";
const FEE_SUFFIX: &str = " BTC";
const STREAM_ERROR: &str = "Stream error";

/// Request for user approval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AskUser {
    /// Delete the existing wallet and start a new one
    WipeWallet,
    /// Derive a new receiving address
    NewAddress,
    /// Sign the staged transaction
    SignTransaction,
    /// Erase everything on the device
    FactoryReset,
    /// Change the wallet's name
    RenameWallet,
    /// Export a wallet backup
    BackupWallet,
    /// Restore a wallet from a backup
    RestoreWallet,
    /// Change the wallet's encryption key
    ChangeKey,
    /// Reveal the master public key
    RevealMasterKey,
    /// A request this firmware does not know; always denied
    Unrecognized(u8),
}

/// Two fixed prompt lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prompt {
    pub top: &'static str,
    pub bottom: &'static str,
}

impl AskUser {
    /// Decode a host command tag
    pub const fn from_tag(tag: u8) -> Self {
        match tag {
            1 => AskUser::WipeWallet,
            2 => AskUser::NewAddress,
            3 => AskUser::SignTransaction,
            4 => AskUser::FactoryReset,
            5 => AskUser::RenameWallet,
            6 => AskUser::BackupWallet,
            7 => AskUser::RestoreWallet,
            8 => AskUser::ChangeKey,
            9 => AskUser::RevealMasterKey,
            other => AskUser::Unrecognized(other),
        }
    }

    /// Fixed prompt for this request
    ///
    /// `SignTransaction` has none; its screens are built from the staged
    /// outputs.
    pub const fn prompt(self) -> Option<Prompt> {
        let (top, bottom) = match self {
            AskUser::WipeWallet => ("Delete existing wallet", "and start a new one?"),
            AskUser::NewAddress => ("Create new", "address?"),
            AskUser::FactoryReset => ("Do you want to", "delete everything?"),
            AskUser::RenameWallet => ("Change the name", "of your wallet?"),
            AskUser::BackupWallet => ("Do you want to do", "a wallet backup?"),
            AskUser::RestoreWallet => ("Restore wallet", "from backup?"),
            AskUser::ChangeKey => ("Change the key", "of your wallet?"),
            AskUser::RevealMasterKey => ("Reveal master", "public key?"),
            AskUser::Unrecognized(_) => ("Unknown command", "Press any button to continue"),
            AskUser::SignTransaction => return None,
        };
        Some(Prompt { top, bottom })
    }
}

/// Outcome of a confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Verdict {
    Approved,
    Denied,
}

impl Verdict {
    /// True if the user denied (or the request was not understood)
    pub fn is_denied(self) -> bool {
        self == Verdict::Denied
    }

    /// True only if the user pressed accept
    pub fn is_approved(self) -> bool {
        self == Verdict::Approved
    }
}

impl From<Button> for Verdict {
    fn from(button: Button) -> Self {
        match button {
            Button::Accept => Verdict::Approved,
            Button::Cancel => Verdict::Denied,
        }
    }
}

/// Foreground UI: the display plus the debounced buttons
pub struct Ui<'a, B, K> {
    pub(crate) lcd: Lcd<'a, B>,
    pub(crate) buttons: K,
}

impl<'a, B: LcdBus, K: Buttons> Ui<'a, B, K> {
    pub fn new(lcd: Lcd<'a, B>, buttons: K) -> Self {
        Self { lcd, buttons }
    }

    /// Ask the user to approve `command`
    ///
    /// For [`AskUser::SignTransaction`] every staged output must be approved,
    /// then the fee if one is staged. The first denial ends the review.
    pub fn confirm(&mut self, command: AskUser, staging: &Staging) -> Verdict {
        self.lcd.clear();

        let verdict = match command {
            AskUser::SignTransaction => self.review_transaction(staging),
            AskUser::Unrecognized(_) => {
                if let Some(prompt) = command.prompt() {
                    self.ask(prompt);
                }
                Verdict::Denied
            }
            _ => match command.prompt() {
                Some(prompt) => self.ask(prompt),
                None => Verdict::Denied,
            },
        };

        #[cfg(feature = "defmt")]
        defmt::debug!("{} -> {}", command, verdict);

        self.lcd.clear();
        verdict
    }

    /// Tell the user the host link failed
    ///
    /// The message stays up until the next request clears it.
    pub fn stream_error(&mut self) {
        self.lcd.clear();
        self.lcd.goto_line_start(Line::Top);
        self.lcd.write_text(STREAM_ERROR);
    }

    fn ask(&mut self, prompt: Prompt) -> Verdict {
        self.wait_for_release();
        self.lcd.goto_line_start(Line::Top);
        self.lcd.write_text(prompt.top);
        self.lcd.goto_line_start(Line::Bottom);
        self.lcd.write_text(prompt.bottom);
        Verdict::from(self.wait_for_press())
    }

    /// Walk the staged outputs, then the fee
    ///
    /// With nothing staged the loop never runs and the verdict stays
    /// `Denied`; the fee screen is only reached after an approval.
    fn review_transaction(&mut self, staging: &Staging) -> Verdict {
        let mut verdict = Verdict::Denied;

        for output in staging.outputs() {
            self.lcd.clear();
            self.wait_for_release();
            self.lcd.goto_line_start(Line::Top);
            self.lcd.write_text(SENDING_PREFIX);
            self.lcd.write_text(&output.amount);
            self.lcd.write_text(SENDING_SUFFIX);
            self.lcd.goto_line_start(Line::Bottom);
            self.lcd.write_text(&output.address);

            verdict = Verdict::from(self.wait_for_press());
            if verdict.is_denied() {
                return verdict;
            }
        }

        if let (Verdict::Approved, Some(fee)) = (verdict, staging.fee()) {
            self.lcd.clear();
            self.wait_for_release();
            self.lcd.goto_line_start(Line::Top);
            self.lcd.write_text(FEE_HEADING);
            self.lcd.goto_line_start(Line::Bottom);
            self.lcd.write_text(fee);
            self.lcd.write_text(FEE_SUFFIX);
            verdict = Verdict::from(self.wait_for_press());
        }

        verdict
    }

    /// Spin until neither button is held
    pub(crate) fn wait_for_release(&self) {
        while !self.buttons.snapshot().is_released() {
            core::hint::spin_loop();
        }
    }

    /// Spin until a button is pressed
    pub(crate) fn wait_for_press(&self) -> Button {
        loop {
            if let Some(button) = self.buttons.snapshot().press() {
                return button;
            }
            core::hint::spin_loop();
        }
    }

    /// Display driver
    pub fn lcd(&self) -> &Lcd<'a, B> {
        &self.lcd
    }

    /// Button source
    pub fn buttons(&self) -> &K {
        &self.buttons
    }
}
