use std::io;

/// Byte-addressed configuration space of a single PCI function.
///
/// This is the only thing the register accessor needs from a transport. Implementations
/// report how many bytes they actually transferred; the accessor turns a short count into
/// an error instead of padding.
pub trait ConfigSpace {
    /// Number of addressable bytes (256 for legacy PCI, 4096 for PCI Express).
    fn size(&self) -> usize;

    /// Reads up to `buf.len()` bytes starting at `offset`, returning the number read.
    fn read_bytes(&self, offset: usize, buf: &mut [u8]) -> io::Result<usize>;

    /// Writes up to `data.len()` bytes starting at `offset`, returning the number written.
    fn write_bytes(&mut self, offset: usize, data: &[u8]) -> io::Result<usize>;
}

impl ConfigSpace for [u8] {
    fn size(&self) -> usize {
        self.len()
    }

    fn read_bytes(&self, offset: usize, buf: &mut [u8]) -> io::Result<usize> {
        let src = self.get(offset..).unwrap_or_default();
        let len = src.len().min(buf.len());
        buf[..len].copy_from_slice(&src[..len]);
        Ok(len)
    }

    fn write_bytes(&mut self, offset: usize, data: &[u8]) -> io::Result<usize> {
        let dst = self.get_mut(offset..).unwrap_or_default();
        let len = dst.len().min(data.len());
        dst[..len].copy_from_slice(&data[..len]);
        Ok(len)
    }
}

impl<const N: usize> ConfigSpace for [u8; N] {
    fn size(&self) -> usize {
        N
    }

    fn read_bytes(&self, offset: usize, buf: &mut [u8]) -> io::Result<usize> {
        self.as_slice().read_bytes(offset, buf)
    }

    fn write_bytes(&mut self, offset: usize, data: &[u8]) -> io::Result<usize> {
        self.as_mut_slice().write_bytes(offset, data)
    }
}

impl ConfigSpace for Vec<u8> {
    fn size(&self) -> usize {
        self.len()
    }

    fn read_bytes(&self, offset: usize, buf: &mut [u8]) -> io::Result<usize> {
        self.as_slice().read_bytes(offset, buf)
    }

    fn write_bytes(&mut self, offset: usize, data: &[u8]) -> io::Result<usize> {
        self.as_mut_slice().write_bytes(offset, data)
    }
}

impl<T: ConfigSpace + ?Sized> ConfigSpace for &mut T {
    fn size(&self) -> usize {
        (**self).size()
    }

    fn read_bytes(&self, offset: usize, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read_bytes(offset, buf)
    }

    fn write_bytes(&mut self, offset: usize, data: &[u8]) -> io::Result<usize> {
        (**self).write_bytes(offset, data)
    }
}

impl<T: ConfigSpace + ?Sized> ConfigSpace for Box<T> {
    fn size(&self) -> usize {
        (**self).size()
    }

    fn read_bytes(&self, offset: usize, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read_bytes(offset, buf)
    }

    fn write_bytes(&mut self, offset: usize, data: &[u8]) -> io::Result<usize> {
        (**self).write_bytes(offset, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_reads_stop_at_the_end() {
        let space = [1u8, 2, 3, 4];
        let mut buf = [0xAAu8; 4];
        assert_eq!(space.read_bytes(2, &mut buf).unwrap(), 2);
        assert_eq!(buf, [3, 4, 0xAA, 0xAA]);
        assert_eq!(space.read_bytes(9, &mut buf).unwrap(), 0);
    }

    #[test]
    fn vec_writes_in_place() {
        let mut space = vec![0u8; 8];
        assert_eq!(space.write_bytes(6, &[9, 9, 9]).unwrap(), 2);
        assert_eq!(space, [0, 0, 0, 0, 0, 0, 9, 9]);
        assert_eq!(space.size(), 8);
    }
}
