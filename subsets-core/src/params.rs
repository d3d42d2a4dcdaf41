//! Board dimensions and the `<W>x<H>n<N>` parameters string.

use core::fmt;

use crate::error::CoreError;

/// Board dimensions: a `w`-wide, `h`-tall grid over an `n`-letter alphabet.
///
/// The puzzle places every one of the `2^n` subsets of the alphabet exactly
/// once, so a valid instance always has `w * h == 2^n`. The shipped size is
/// `4x4n4`; the representation is written to generalise to any `n` up to
/// [`crate::domain::MAX_N`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    pub w: u16,
    pub h: u16,
    pub n: u8,
}

impl Params {
    /// The only size this build accepts: a 4x4 grid over a 4-letter
    /// alphabet (16 cells, 16 values). The rest of the crate is written in
    /// terms of `w`/`h`/`n` throughout, so lifting this restriction is a
    /// matter of relaxing [`Params::validate`], not rewriting the board,
    /// validator, solver, or generator.
    pub const fn standard() -> Self {
        Self { w: 4, h: 4, n: 4 }
    }

    /// Structural and shipped-size validation (checks the `<W>x<H>n<N>`
    /// parameters string): the alphabet must fit a [`Value`](crate::domain::Value),
    /// `w*h` must equal `2^n`, and — for now — the size must be exactly
    /// `4x4n4`.
    pub fn validate(self) -> Result<(), CoreError> {
        if self.n == 0 || self.n > crate::domain::MAX_N {
            return Err(CoreError::InvalidGridSize(self.n));
        }
        let area = crate::domain::value_count(self.n);
        if (self.w as usize) * (self.h as usize) != area {
            return Err(CoreError::InvalidParams {
                w: self.w,
                h: self.h,
                n: self.n,
            });
        }
        if self != Self::standard() {
            return Err(CoreError::UnsupportedSize {
                w: self.w,
                h: self.h,
                n: self.n,
            });
        }
        Ok(())
    }

    pub fn area(self) -> usize {
        (self.w as usize) * (self.h as usize)
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}n{}", self.w, self.h, self.n)
    }
}

impl core::str::FromStr for Params {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || CoreError::InvalidParams { w: 0, h: 0, n: 0 };
        let (w_str, rest) = s.split_once('x').ok_or_else(bad)?;
        let (h_str, n_str) = rest.split_once('n').ok_or_else(bad)?;
        let w: u16 = w_str.parse().map_err(|_| bad())?;
        let h: u16 = h_str.parse().map_err(|_| bad())?;
        let n: u8 = n_str.parse().map_err(|_| bad())?;
        let params = Params { w, h, n };
        params.validate()?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_is_valid() {
        Params::standard().validate().unwrap();
    }

    #[test]
    fn rejects_mismatched_area() {
        let p = Params { w: 4, h: 4, n: 3 };
        assert!(matches!(
            p.validate(),
            Err(CoreError::InvalidParams { .. })
        ));
    }

    #[test]
    fn parses_and_displays() {
        let p: Params = "4x4n4".parse().unwrap();
        assert_eq!(p, Params::standard());
        assert_eq!(p.to_string(), "4x4n4");
    }

    #[test]
    fn rejects_other_sizes() {
        assert!("5x5n5".parse::<Params>().is_err());
        assert!("garbage".parse::<Params>().is_err());
    }

    #[test]
    fn rejects_non_shipped_size_with_valid_area() {
        // 2x2n2 satisfies w*h = 2^n but isn't the shipped 4x4n4 size.
        let p = Params { w: 2, h: 2, n: 2 };
        assert!(matches!(
            p.validate(),
            Err(CoreError::UnsupportedSize { .. })
        ));
    }
}
