// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

/*! A `printf` restricted to what bring-up code needs.

Supported directives:

 - `%x` prints the next argument in lowercase hexadecimal, without padding or prefix.
 - `%c` prints the low byte of the next argument.
 - `%%` prints a single `%`.

Every other byte is copied as is. Unknown directives, a trailing `%`, and
directives without a matching argument are printed verbatim. Surplus
arguments are ignored.

Only ever pass trusted, constant templates. Bytes that come from a
peripheral belong in [`ByteSink::put_all`].
*/

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Destination for formatted output.
pub trait ByteSink {
    type Error;

    fn put(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Print `bytes` literally, without interpreting any directives.
    fn put_all(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        for &b in bytes {
            self.put(b)?;
        }
        Ok(())
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    type Error = S::Error;

    fn put(&mut self, byte: u8) -> Result<(), Self::Error> {
        (**self).put(byte)
    }

    fn put_all(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).put_all(bytes)
    }
}

/// A fixed capacity sink ran out of space.
#[derive(ufmt::derive::uDebug, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkFull;

impl<const N: usize> ByteSink for heapless::Vec<u8, N> {
    type Error = SinkFull;

    fn put(&mut self, byte: u8) -> Result<(), SinkFull> {
        self.push(byte).map_err(|_| SinkFull)
    }
}

/// Write `template` to `out`, substituting directives with `args`.
pub fn format<S: ByteSink + ?Sized>(
    out: &mut S,
    template: &[u8],
    args: &[u32],
) -> Result<(), S::Error> {
    let mut args = args.iter().copied();
    let mut rest = template;

    loop {
        let literal_len = rest
            .iter()
            .position(|&b| b == b'%')
            .unwrap_or(rest.len());
        out.put_all(&rest[..literal_len])?;

        rest = match &rest[literal_len..] {
            [] => return Ok(()),
            [_percent] => return out.put(b'%'),
            [_percent, directive, tail @ ..] => {
                match *directive {
                    b'%' => out.put(b'%')?,
                    b'x' | b'c' => match args.next() {
                        Some(arg) if *directive == b'x' => write_hex(out, arg)?,
                        Some(arg) => out.put(arg as u8)?,
                        None => out.put_all(&[b'%', *directive])?,
                    },
                    other => out.put_all(&[b'%', other])?,
                }
                tail
            }
        };
    }
}

/// Lowercase hexadecimal, at least one digit, no leading zeros.
pub fn write_hex<S: ByteSink + ?Sized>(out: &mut S, value: u32) -> Result<(), S::Error> {
    let mut digits = [0u8; 8];
    let mut start = digits.len();
    let mut rest = value;
    loop {
        start -= 1;
        digits[start] = HEX_DIGITS[(rest & 0xf) as usize];
        rest >>= 4;
        if rest == 0 {
            break;
        }
    }
    out.put_all(&digits[start..])
}

/// Format into a [`ByteSink`]: `printf!(&mut uart, "%c = %x\n", b'a', 0x61)`.
///
/// The sink is taken by mutable reference. Arguments are converted with
/// `as u32`.
#[macro_export]
macro_rules! printf {
    ($out:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::printf::format(
            $out,
            ::core::convert::AsRef::<[u8]>::as_ref($template),
            &[$($arg as u32),*],
        )
    };
}
