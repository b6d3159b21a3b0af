// formatting for complex roots

use num::Complex;

use crate::RealScalar;

/// `a+ib` style formatting, since the `Display` impl of [`Complex`] prints
/// `a+bi` with a sign glued to a possibly negative `b`.
pub(crate) fn complex_fmt<T: RealScalar>(c: &Complex<T>) -> String {
    let r = c.re;
    let i = c.im;
    let sign = if i.is_sign_negative() { '-' } else { '+' };
    let i = i.abs();
    if i.is_zero() {
        format!("{r}")
    } else if i.is_one() {
        format!("({r}{sign}i)")
    } else {
        format!("({r}{sign}i{i})")
    }
}

#[cfg(test)]
mod test {
    use super::complex_fmt;

    #[test]
    fn fmt() {
        assert_eq!(complex_fmt(&complex!(2.5)), "2.5");
        assert_eq!(complex_fmt(&complex!(-1.0, 1.0)), "(-1+i)");
        assert_eq!(complex_fmt(&complex!(0.5, -3.0)), "(0.5-i3)");
        assert_eq!(complex_fmt(&complex!(0.0, -1.0)), "(0-i)");
    }
}
