//! Named locations and the id index assigned at load time.

use crate::error::{Result, RouteError};
use crate::geo::Coordinate;
use std::collections::HashMap;

/// A named point. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    name: String,
    coordinate: Coordinate,
}

impl Location {
    pub fn new(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            coordinate,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

/// Locations with dense ids `0..len` in load order and a name index.
///
/// # Examples
///
/// ```
/// use u_anneal_route::geo::Coordinate;
/// use u_anneal_route::tsp::LocationSet;
///
/// let set = LocationSet::new([
///     ("FORTALEZA", Coordinate::from_lon_lat(-38.58, -3.72)),
///     ("CASCAVEL", Coordinate::from_lon_lat(-38.23, -4.13)),
/// ]).unwrap();
/// assert_eq!(set.id_of("CASCAVEL"), Some(1));
/// assert_eq!(set.name(0), Some("FORTALEZA"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocationSet {
    locations: Vec<Location>,
    index: HashMap<String, usize>,
}

impl LocationSet {
    /// Loads `(name, coordinate)` entries, rejecting duplicate names.
    pub fn new<I, N>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, Coordinate)>,
        N: Into<String>,
    {
        let mut set = Self::default();
        for (name, coordinate) in entries {
            set.push(Location::new(name, coordinate))?;
        }
        Ok(set)
    }

    /// Appends a location and returns its id.
    pub fn push(&mut self, location: Location) -> Result<usize> {
        if self.index.contains_key(location.name()) {
            return Err(RouteError::DuplicateLocation(location.name.clone()));
        }
        let id = self.locations.len();
        self.index.insert(location.name.clone(), id);
        self.locations.push(location);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&Location> {
        self.locations.get(id)
    }

    pub fn id_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn name(&self, id: usize) -> Option<&str> {
        self.get(id).map(Location::name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    /// Translates a sequence of ids into location names.
    pub fn names<'a, I>(&self, ids: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = &'a usize>,
    {
        ids.into_iter()
            .map(|&id| {
                self.name(id)
                    .map(str::to_owned)
                    .ok_or(RouteError::UnknownLocation(id))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lon: f64, lat: f64) -> Coordinate {
        Coordinate::from_lon_lat(lon, lat)
    }

    #[test]
    fn test_ids_follow_load_order() {
        let set = LocationSet::new([("A", coord(0.0, 0.0)), ("B", coord(1.0, 1.0))]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.id_of("A"), Some(0));
        assert_eq!(set.id_of("B"), Some(1));
        assert_eq!(set.get(1).unwrap().coordinate(), coord(1.0, 1.0));
        assert_eq!(set.id_of("C"), None);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let err = LocationSet::new([("A", coord(0.0, 0.0)), ("A", coord(1.0, 1.0))]).unwrap_err();
        assert_eq!(err, RouteError::DuplicateLocation("A".into()));
    }

    #[test]
    fn test_names_translation() {
        let set = LocationSet::new([("A", coord(0.0, 0.0)), ("B", coord(1.0, 1.0))]).unwrap();
        assert_eq!(set.names(&[1, 0]).unwrap(), vec!["B", "A"]);
        assert_eq!(set.names(&[2]).unwrap_err(), RouteError::UnknownLocation(2));
    }

    #[test]
    fn test_empty_set() {
        let set = LocationSet::new(Vec::<(String, Coordinate)>::new()).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.iter().count(), 0);
    }
}
