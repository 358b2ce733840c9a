/// Implement an arithmetic trait from std::ops, along with its `*Assign` sibling, for a `Copy` type
/// over owned and borrowed right-hand sides.
///
/// Only the assigning form is written out; the binary operator copies `self`, assigns into the
/// copy, and returns it.
#[macro_export]
macro_rules! impl_op {
    ($Op:ident, $op:ident, $Assign:ident, $assign:ident;
     $lhs:ident: $Lhs:ty, $rhs:ident: $Rhs:ty;
     $act:expr) => {
        impl ::std::ops::$Assign<$Rhs> for $Lhs {
            #[inline]
            fn $assign(&mut $lhs, $rhs: $Rhs) {
                $act;
            }
        }
        impl ::std::ops::$Assign<&$Rhs> for $Lhs {
            #[inline]
            fn $assign(&mut self, rhs: &$Rhs) {
                ::std::ops::$Assign::$assign(self, *rhs);
            }
        }
        impl ::std::ops::$Op<$Rhs> for $Lhs {
            type Output = $Lhs;
            #[inline]
            fn $op(mut self, rhs: $Rhs) -> Self::Output {
                ::std::ops::$Assign::$assign(&mut self, rhs);
                self
            }
        }
        impl ::std::ops::$Op<&$Rhs> for $Lhs {
            type Output = $Lhs;
            #[inline]
            fn $op(mut self, rhs: &$Rhs) -> Self::Output {
                ::std::ops::$Assign::$assign(&mut self, *rhs);
                self
            }
        }
    };
}

#[macro_export]
macro_rules! impl_add_sub {
    ($lhs:ident: $Lhs:ty, $rhs:ident: $Rhs:ty; $add_asn:expr; $sub_asn:expr) => {
        $crate::impl_op! {Add, add, AddAssign, add_assign; $lhs: $Lhs, $rhs: $Rhs; $add_asn}
        $crate::impl_op! {Sub, sub, SubAssign, sub_assign; $lhs: $Lhs, $rhs: $Rhs; $sub_asn}
    };
}

#[macro_export]
macro_rules! impl_mul_div {
    ($lhs:ident: $Lhs:ty, $rhs:ident: $Rhs:ty; $mul_asn:expr; $div_asn:expr) => {
        $crate::impl_op! {Mul, mul, MulAssign, mul_assign; $lhs: $Lhs, $rhs: $Rhs; $mul_asn}
        $crate::impl_op! {Div, div, DivAssign, div_assign; $lhs: $Lhs, $rhs: $Rhs; $div_asn}
    };
}
