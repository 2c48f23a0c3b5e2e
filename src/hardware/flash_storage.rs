use crate::config::Storage;
use embassy_stm32::flash::{Blocking, Error, Flash};

/// Last 1 KiB page of the 64 KiB STM32F103C8 flash.
const PAGE_OFFSET: u32 = 63 * 1024;
const PAGE_SIZE: u32 = 1024;

/// Record layout: cells at 0x00, 0x02, 0x04 and a marker at 0x06. Flash on
/// the F1 programs in half-words, so every cell owns two bytes.
const RECORD_LEN: usize = 8;
const MARKER_ADDRESS: usize = 6;
const MARKER: [u8; 2] = [0xB7, 0x5A];

/// Settings cells emulated on one flash page.
///
/// The F103 has no data EEPROM. A page without the marker (blank or
/// foreign) reads back as all zeroes, the factory default.
pub struct FlashStorage<'d> {
    flash: Flash<'d, Blocking>,
}

impl<'d> FlashStorage<'d> {
    pub fn new(flash: Flash<'d, Blocking>) -> Self {
        Self { flash }
    }

    fn read_record(&mut self) -> Result<[u8; RECORD_LEN], Error> {
        let mut record = [0u8; RECORD_LEN];
        self.flash.blocking_read(PAGE_OFFSET, &mut record)?;

        if record[MARKER_ADDRESS..] != MARKER {
            debug!("settings page blank, using factory defaults");
            record = [0u8; RECORD_LEN];
            record[MARKER_ADDRESS..].copy_from_slice(&MARKER);
        }

        Ok(record)
    }
}

impl Storage for FlashStorage<'_> {
    type Error = Error;

    fn read(&mut self, address: u8) -> Result<u8, Self::Error> {
        let record = self.read_record()?;
        Ok(record.get(address as usize).copied().unwrap_or(0))
    }

    fn write(&mut self, address: u8, value: u8) -> Result<(), Self::Error> {
        let address = address as usize;
        if address >= MARKER_ADDRESS {
            return Err(Error::Size);
        }

        let mut record = self.read_record()?;
        record[address] = value;

        self.flash.blocking_erase(PAGE_OFFSET, PAGE_OFFSET + PAGE_SIZE)?;
        self.flash.blocking_write(PAGE_OFFSET, &record)?;

        trace!("settings cell {=usize:#x} <- {=u8}", address, value);
        Ok(())
    }
}
