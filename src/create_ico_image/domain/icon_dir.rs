use crate::domain::error::DomainError;
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{self, Write};

pub const HEADER_SIZE: u32 = 6;
pub const ENTRY_SIZE: u32 = 16;
pub const MAX_IMAGES: usize = u16::MAX as usize;

const ICON_RESOURCE_TYPE: u16 = 1;
const PNG_BITS_PER_PIXEL: u16 = 32;

// 1バイトの幅・高さフィールド: 256 は 0 で表す
pub fn encode_dimension(pixels: u32) -> Result<u8, DomainError> {
    match pixels {
        256 => Ok(0),
        1..=255 => Ok(pixels as u8),
        _ => Err(DomainError::UnrepresentableDimension(pixels)),
    }
}

pub fn payload_start(num_images: u16) -> u32 {
    HEADER_SIZE + ENTRY_SIZE * u32::from(num_images)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryHeader {
    pub reserved: u16,
    pub image_type: u16,
    pub num_images: u16,
}

impl DirectoryHeader {
    pub fn for_image_count(count: usize) -> Result<Self, DomainError> {
        let num_images = u16::try_from(count).map_err(|_| DomainError::CapacityExceeded {
            count,
            max: MAX_IMAGES,
        })?;

        Ok(Self {
            reserved: 0,
            image_type: ICON_RESOURCE_TYPE,
            num_images,
        })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u16::<LittleEndian>(self.reserved)?;
        writer.write_u16::<LittleEndian>(self.image_type)?;
        writer.write_u16::<LittleEndian>(self.num_images)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub width: u8,  // 0 == 256
    pub height: u8, // 0 == 256
    pub num_colors: u8,
    pub reserved: u8,
    pub color_planes: u16,
    pub bits_per_pixel: u16,
    pub image_data_size: u32,
    pub image_data_offset: u32, // ファイル先頭からのオフセット
}

impl DirectoryEntry {
    // PNG の場合パレットとプレーン数は 0
    pub fn for_png(width: u32, height: u32, size: u32, offset: u32) -> Result<Self, DomainError> {
        Ok(Self {
            width: encode_dimension(width)?,
            height: encode_dimension(height)?,
            num_colors: 0,
            reserved: 0,
            color_planes: 0,
            bits_per_pixel: PNG_BITS_PER_PIXEL,
            image_data_size: size,
            image_data_offset: offset,
        })
    }

    pub fn width_pixels(&self) -> u32 {
        decode_dimension(self.width)
    }

    pub fn height_pixels(&self) -> u32 {
        decode_dimension(self.height)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u8(self.width)?;
        writer.write_u8(self.height)?;
        writer.write_u8(self.num_colors)?;
        writer.write_u8(self.reserved)?;
        writer.write_u16::<LittleEndian>(self.color_planes)?;
        writer.write_u16::<LittleEndian>(self.bits_per_pixel)?;
        writer.write_u32::<LittleEndian>(self.image_data_size)?;
        writer.write_u32::<LittleEndian>(self.image_data_offset)?;
        Ok(())
    }
}

fn decode_dimension(byte: u8) -> u32 {
    if byte == 0 {
        256
    } else {
        u32::from(byte)
    }
}

// ICONDIR + ICONDIRENTRY[]。push した順にペイロードのオフセットを割り当てる
#[derive(Debug, Clone)]
pub struct IconDirectory {
    header: DirectoryHeader,
    entries: Vec<DirectoryEntry>,
    next_offset: u32,
}

impl IconDirectory {
    pub fn with_image_count(count: usize) -> Result<Self, DomainError> {
        let header = DirectoryHeader::for_image_count(count)?;
        Ok(Self {
            header,
            entries: Vec::with_capacity(count),
            next_offset: payload_start(header.num_images),
        })
    }

    pub fn push_png(
        &mut self,
        width: u32,
        height: u32,
        payload_len: usize,
    ) -> Result<&DirectoryEntry, DomainError> {
        let declared = usize::from(self.header.num_images);
        if self.entries.len() >= declared {
            return Err(DomainError::DirectoryFull(declared));
        }

        let size = u32::try_from(payload_len).map_err(|_| DomainError::ContainerTooLarge)?;
        let offset = self.next_offset;
        let next_offset = offset
            .checked_add(size)
            .ok_or(DomainError::ContainerTooLarge)?;

        let entry = DirectoryEntry::for_png(width, height, size, offset)?;
        self.entries.push(entry);
        self.next_offset = next_offset;

        let index = self.entries.len() - 1;
        Ok(&self.entries[index])
    }

    pub fn header(&self) -> &DirectoryHeader {
        &self.header
    }

    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn is_complete(&self) -> bool {
        self.entries.len() == usize::from(self.header.num_images)
    }

    pub fn total_len(&self) -> u32 {
        self.next_offset
    }

    // ペイロードは書かない
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.header.write_to(writer)?;
        for entry in &self.entries {
            entry.write_to(writer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn read_directory(bytes: &[u8]) -> (DirectoryHeader, Vec<DirectoryEntry>) {
    use byteorder::ReadBytesExt;
    use std::io::Cursor;

    let mut reader = Cursor::new(bytes);
    let header = DirectoryHeader {
        reserved: reader.read_u16::<LittleEndian>().unwrap(),
        image_type: reader.read_u16::<LittleEndian>().unwrap(),
        num_images: reader.read_u16::<LittleEndian>().unwrap(),
    };
    let entries = (0..header.num_images)
        .map(|_| DirectoryEntry {
            width: reader.read_u8().unwrap(),
            height: reader.read_u8().unwrap(),
            num_colors: reader.read_u8().unwrap(),
            reserved: reader.read_u8().unwrap(),
            color_planes: reader.read_u16::<LittleEndian>().unwrap(),
            bits_per_pixel: reader.read_u16::<LittleEndian>().unwrap(),
            image_data_size: reader.read_u32::<LittleEndian>().unwrap(),
            image_data_offset: reader.read_u32::<LittleEndian>().unwrap(),
        })
        .collect();
    (header, entries)
}
