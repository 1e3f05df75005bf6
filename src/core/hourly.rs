use std::ops::{Index, IndexMut};

use crate::core::hour::Hour;

/// One value per hour of the day.
///
/// N-th element belongs to the time slot of N:00:00-N:59:59.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Hourly<T>([T; Hour::N_HOURS]);

impl<T: Default> Default for Hourly<T> {
    fn default() -> Self {
        Self(std::array::from_fn(|_| T::default()))
    }
}

impl<T> Hourly<T> {
    /// Iterate the slots from midnight on.
    pub fn iter(&self) -> impl Iterator<Item = (Hour, &T)> {
        Hour::all().zip(&self.0)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Hour, &mut T)> {
        Hour::all().zip(&mut self.0)
    }

    #[cfg(test)]
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }
}

impl<T> Index<Hour> for Hourly<T> {
    type Output = T;

    fn index(&self, hour: Hour) -> &Self::Output {
        &self.0[hour.index()]
    }
}

impl<T> IndexMut<Hour> for Hourly<T> {
    fn index_mut(&mut self, hour: Hour) -> &mut Self::Output {
        &mut self.0[hour.index()]
    }
}
