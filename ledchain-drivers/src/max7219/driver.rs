//! MAX7219 chain driver
//!
//! Owns the SPI bus and the LOAD line. Every register write is one frame:
//! LOAD low, one address/data word per chip, LOAD high.

use ledchain_core::canvas::{Canvas, MAX_MODULES, ROWS};
use ledchain_core::config::{Brightness, ChainOrder};
use ledchain_core::traits::FrameSink;
use ledchain_hal::{OutputPin, SpiBus};

use super::layout::ChainLayout;
use super::reg;

/// Largest frame the driver ever sends (one word per chip)
pub const FRAME_CAPACITY: usize = MAX_MODULES * 2;

/// MAX7219 driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Max7219Error<E> {
    /// SPI transfer failed
    Spi(E),
    /// Module count outside 1..=MAX_MODULES
    InvalidModuleCount,
    /// Canvas length differs from the chain length
    ModuleCountMismatch,
    /// Module index beyond the end of the chain
    ModuleOutOfRange,
}

/// Build a frame that writes `data` to `register` on one module
///
/// Every other module in the chain receives a NOOP word. Returns the
/// number of bytes used in `buf`, or `None` if the module is not part of
/// the layout or `buf` is too small.
pub fn encode_frame(
    layout: &ChainLayout,
    module: usize,
    register: u8,
    data: u8,
    buf: &mut [u8],
) -> Option<usize> {
    let len = layout.module_count() * 2;
    if buf.len() < len {
        return None;
    }
    let slot = layout.slot(module)?;

    buf[..len].fill(reg::NOOP);
    buf[slot * 2] = register;
    buf[slot * 2 + 1] = data;

    Some(len)
}

/// Chain of MAX7219 matrix modules
pub struct Max7219<SPI, CS> {
    spi: SPI,
    cs: CS,
    layout: ChainLayout,
    brightness: Brightness,
    powered: bool,
    initialized: bool,
    frame: [u8; FRAME_CAPACITY],
}

impl<SPI, CS> Max7219<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    /// Create a driver for `module_count` chained chips
    ///
    /// Leaves LOAD high. Call [`init`](Self::init) before the first flush.
    pub fn new(
        spi: SPI,
        mut cs: CS,
        module_count: usize,
        order: ChainOrder,
    ) -> Result<Self, Max7219Error<SPI::Error>> {
        let layout =
            ChainLayout::new(module_count, order).ok_or(Max7219Error::InvalidModuleCount)?;
        cs.set_high();

        Ok(Self {
            spi,
            cs,
            layout,
            brightness: Brightness::default(),
            powered: false,
            initialized: false,
            frame: [0; FRAME_CAPACITY],
        })
    }

    /// Number of chips in the chain
    pub fn module_count(&self) -> usize {
        self.layout.module_count()
    }

    /// Logical-to-physical mapping in use
    pub fn layout(&self) -> &ChainLayout {
        &self.layout
    }

    /// Current intensity level
    pub fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// Check if the chips are out of shutdown
    pub fn is_powered(&self) -> bool {
        self.powered
    }

    /// Check if the init sequence has run
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Release the bus and pin
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }

    /// Bring every chip into matrix mode and blank it
    ///
    /// Scan all 8 rows, no BCD decode, leave shutdown, display test off,
    /// then set intensity and zero every row register.
    pub fn init(&mut self, brightness: Brightness) -> Result<(), Max7219Error<SPI::Error>> {
        self.write_all(reg::SCAN_LIMIT, 0x07)?;
        self.write_all(reg::DECODE_MODE, 0x00)?;
        self.write_all(reg::SHUTDOWN, 0x01)?;
        self.write_all(reg::DISPLAY_TEST, 0x00)?;
        self.powered = true;

        self.set_brightness(brightness)?;
        self.clear_all()?;

        self.initialized = true;
        Ok(())
    }

    /// Set the intensity on every chip
    pub fn set_brightness(
        &mut self,
        brightness: impl Into<Brightness>,
    ) -> Result<(), Max7219Error<SPI::Error>> {
        let brightness = brightness.into();
        self.write_all(reg::INTENSITY, brightness.level())?;
        self.brightness = brightness;
        Ok(())
    }

    /// Enter or leave shutdown on every chip
    ///
    /// Row registers keep their contents while shut down.
    pub fn set_power(&mut self, on: bool) -> Result<(), Max7219Error<SPI::Error>> {
        self.write_all(reg::SHUTDOWN, on as u8)?;
        self.powered = on;
        Ok(())
    }

    /// Light every LED (display test) or return to normal scanning
    pub fn set_test_mode(&mut self, on: bool) -> Result<(), Max7219Error<SPI::Error>> {
        self.write_all(reg::DISPLAY_TEST, on as u8)
    }

    /// Zero every row register on every chip
    pub fn clear_all(&mut self) -> Result<(), Max7219Error<SPI::Error>> {
        for row in 0..ROWS as u8 {
            self.write_all(reg::digit(row), 0x00)?;
        }
        Ok(())
    }

    /// Write the same register value to every chip in one frame
    pub fn write_all(&mut self, register: u8, data: u8) -> Result<(), Max7219Error<SPI::Error>> {
        let len = self.layout.module_count() * 2;
        for word in self.frame[..len].chunks_exact_mut(2) {
            word[0] = register;
            word[1] = data;
        }
        self.send(len)
    }

    /// Write one register on one chip, NOOP to the rest
    pub fn write_register(
        &mut self,
        module: usize,
        register: u8,
        data: u8,
    ) -> Result<(), Max7219Error<SPI::Error>> {
        let len = encode_frame(&self.layout, module, register, data, &mut self.frame)
            .ok_or(Max7219Error::ModuleOutOfRange)?;
        self.send(len)
    }

    /// Clock out the first `len` frame bytes inside one LOAD pulse
    fn send(&mut self, len: usize) -> Result<(), Max7219Error<SPI::Error>> {
        self.cs.set_low();
        let result = self.spi.write(&self.frame[..len]);
        // Raise LOAD even on failure so the chain is never left selected
        self.cs.set_high();
        result.map_err(Max7219Error::Spi)
    }
}

impl<SPI, CS> FrameSink for Max7219<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    type Error = Max7219Error<SPI::Error>;

    /// Send all 8 rows of every segment, one module at a time
    fn flush(&mut self, canvas: &Canvas) -> Result<(), Self::Error> {
        if canvas.len() != self.layout.module_count() {
            return Err(Max7219Error::ModuleCountMismatch);
        }

        for (module, segment) in canvas.segments().iter().enumerate() {
            for (row, &data) in segment.rows().iter().enumerate() {
                self.write_register(module, reg::digit(row as u8), data)?;
            }
        }

        Ok(())
    }
}
