//! Leveled assertion macros. The simple level is always active; the more expensive levels are
//! only active in tests or with the `debug-checks` feature enabled.

#[cfg(all(not(test), not(feature = "debug-checks")))]
pub const ROSTER_ASSERT_LEVEL_DEFINITION: u8 = ROSTER_ASSERT_SIMPLE;

#[cfg(any(test, feature = "debug-checks"))]
pub const ROSTER_ASSERT_LEVEL_DEFINITION: u8 = ROSTER_ASSERT_EXTREME;

pub const ROSTER_ASSERT_SIMPLE: u8 = 1;
pub const ROSTER_ASSERT_MODERATE: u8 = 2;
pub const ROSTER_ASSERT_EXTREME: u8 = 3;

#[macro_export]
#[doc(hidden)]
macro_rules! roster_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::ROSTER_ASSERT_LEVEL_DEFINITION >= $crate::asserts::ROSTER_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! roster_assert_eq_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::ROSTER_ASSERT_LEVEL_DEFINITION >= $crate::asserts::ROSTER_ASSERT_SIMPLE {
            assert_eq!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! roster_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::ROSTER_ASSERT_LEVEL_DEFINITION >= $crate::asserts::ROSTER_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! roster_assert_extreme {
    ($($arg:tt)*) => {
        if $crate::asserts::ROSTER_ASSERT_LEVEL_DEFINITION >= $crate::asserts::ROSTER_ASSERT_EXTREME {
            assert!($($arg)*);
        }
    };
}
