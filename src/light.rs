//! Ring-light control.
//!
//! [`LightController`] owns the one handle to the LED strip and fills every
//! element with a single color. The strip itself is any
//! [`SmartLedsWrite`] driver: a WS2812 chain on SPI with the `hardware`
//! feature, or [`DryRunStrip`] which only logs.

use std::fmt::Debug;

use log::{debug, warn};
use smart_leds::{RGB8, SmartLedsWrite};

use crate::error::Error;
use crate::types::LightColor;

pub struct LightController<W> {
    strip: W,
    len: usize,
    last_applied: Option<LightColor>,
    faulted: bool,
}

impl<W> LightController<W>
where
    W: SmartLedsWrite<Color = RGB8>,
    W::Error: Debug,
{
    /// Take ownership of the strip and light it with `warmup`.
    /// A strip that cannot be written at startup is fatal.
    pub fn new(strip: W, len: usize, warmup: LightColor) -> Result<Self, Error> {
        let mut ctl = Self { strip, len, last_applied: None, faulted: false };
        ctl.write(warmup)?;
        ctl.last_applied = Some(warmup);
        Ok(ctl)
    }

    /// Set every element to `color`. Best-effort: a failed write is logged
    /// once and then ignored until the strip recovers.
    pub fn apply(&mut self, color: LightColor) {
        match self.write(color) {
            Ok(()) => {
                if self.faulted {
                    debug!("light strip writes recovered");
                }
                self.faulted = false;
                self.last_applied = Some(color);
            }
            Err(e) => {
                if !self.faulted {
                    warn!("{e}; further light errors suppressed");
                }
                self.faulted = true;
            }
        }
    }

    /// Turn every element off.
    pub fn clear(&mut self) -> Result<(), Error> {
        self.write(LightColor::OFF)?;
        self.last_applied = Some(LightColor::OFF);
        Ok(())
    }

    pub fn last_applied(&self) -> Option<LightColor> {
        self.last_applied
    }

    #[cfg(test)]
    pub(crate) fn strip_ref(&self) -> &W {
        &self.strip
    }

    #[cfg(test)]
    pub(crate) fn strip_mut(&mut self) -> &mut W {
        &mut self.strip
    }

    fn write(&mut self, color: LightColor) -> Result<(), Error> {
        let rgb = RGB8::from(color);
        self.strip
            .write(std::iter::repeat_n(rgb, self.len))
            .map_err(|e| Error::Light(format!("{e:?}")))
    }
}

/// Stand-in strip for machines without the ring light attached.
#[derive(Default)]
pub struct DryRunStrip {
    last: Option<RGB8>,
}

impl SmartLedsWrite for DryRunStrip {
    type Error = std::convert::Infallible;
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        let mut it = iterator.into_iter().map(Into::into);
        let first = it.next();
        let n = 1 + it.count();
        if first != self.last {
            if let Some(c) = first {
                debug!("light: {n} leds -> ({}, {}, {})", c.r, c.g, c.b);
            }
            self.last = first;
        }
        Ok(())
    }
}

/// WS2812 ring on SPI0 of a Raspberry Pi (data on MOSI).
#[cfg(feature = "hardware")]
pub mod hardware {
    use rppal::spi::{Bus, Mode, SlaveSelect, Spi};
    use ws2812_spi::Ws2812;

    use crate::error::Error;

    pub type SpiStrip = Ws2812<Spi>;

    /// WS2812 timing needs the SPI clock between 2 and 3.8 MHz.
    const SPI_CLOCK_HZ: u32 = 3_000_000;

    pub fn open() -> Result<SpiStrip, Error> {
        let spi = Spi::new(Bus::Spi0, SlaveSelect::Ss0, SPI_CLOCK_HZ, Mode::Mode0)
            .map_err(|e| Error::Light(format!("open SPI0: {e}")))?;
        Ok(Ws2812::new(spi))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every frame written; can be told to fail.
    #[derive(Default)]
    pub(crate) struct RecordingStrip {
        pub writes: Vec<Vec<RGB8>>,
        pub fail: bool,
        pub events: Option<Rc<RefCell<Vec<&'static str>>>>,
    }

    impl SmartLedsWrite for RecordingStrip {
        type Error = &'static str;
        type Color = RGB8;

        fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
        where
            T: IntoIterator<Item = I>,
            I: Into<Self::Color>,
        {
            if let Some(ev) = &self.events {
                ev.borrow_mut().push("light");
            }
            if self.fail {
                return Err("bus unavailable");
            }
            self.writes.push(iterator.into_iter().map(Into::into).collect());
            Ok(())
        }
    }

    fn strip_len(ctl: &LightController<RecordingStrip>) -> usize {
        ctl.strip.writes.last().map(Vec::len).unwrap_or(0)
    }

    #[test]
    fn new_writes_warmup_to_every_element() {
        let ctl = LightController::new(RecordingStrip::default(), 24, LightColor::new(150, 150, 150)).unwrap();
        assert_eq!(strip_len(&ctl), 24);
        assert!(ctl.strip.writes[0].iter().all(|&c| c == RGB8::new(150, 150, 150)));
    }

    #[test]
    fn new_fails_when_strip_unavailable() {
        let strip = RecordingStrip { fail: true, ..Default::default() };
        let err = LightController::new(strip, 24, LightColor::OFF).err().unwrap();
        assert!(matches!(err, Error::Light(_)));
    }

    #[test]
    fn apply_fills_whole_strip() {
        let mut ctl = LightController::new(RecordingStrip::default(), 24, LightColor::OFF).unwrap();
        ctl.apply(LightColor::new(10, 20, 30));
        let last = ctl.strip.writes.last().unwrap();
        assert_eq!(last.len(), 24);
        assert!(last.iter().all(|&c| c == RGB8::new(10, 20, 30)));
        assert_eq!(ctl.last_applied(), Some(LightColor::new(10, 20, 30)));
    }

    #[test]
    fn apply_failure_is_swallowed() {
        let mut ctl = LightController::new(RecordingStrip::default(), 4, LightColor::OFF).unwrap();
        ctl.strip.fail = true;
        ctl.apply(LightColor::new(1, 2, 3));
        ctl.apply(LightColor::new(4, 5, 6));
        assert!(ctl.faulted);
        assert_eq!(ctl.last_applied(), Some(LightColor::OFF));

        ctl.strip.fail = false;
        ctl.apply(LightColor::new(7, 8, 9));
        assert!(!ctl.faulted);
        assert_eq!(ctl.last_applied(), Some(LightColor::new(7, 8, 9)));
    }

    #[test]
    fn clear_without_apply_turns_everything_off() {
        let mut ctl = LightController::new(RecordingStrip::default(), 24, LightColor::new(150, 150, 150)).unwrap();
        ctl.clear().unwrap();
        assert!(ctl.strip.writes.last().unwrap().iter().all(|&c| c == RGB8::new(0, 0, 0)));
    }

    #[test]
    fn dry_run_strip_accepts_writes() {
        let mut ctl = LightController::new(DryRunStrip::default(), 24, LightColor::OFF).unwrap();
        ctl.apply(LightColor::new(1, 1, 1));
        assert!(ctl.clear().is_ok());
    }
}
