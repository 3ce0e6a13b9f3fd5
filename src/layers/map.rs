//! Total map from every text layer to a value

use std::collections::BTreeMap;
use std::ops::{Index, IndexMut};

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::LayerId;

/// Errors when building a [`LayerMap`] from a partial map
#[derive(Debug, Error, PartialEq)]
pub enum LayerMapError {
    #[error("missing entry for layer '{0}'")]
    Missing(LayerId),
}

/// Exactly one value per [`LayerId`]
///
/// There is no way to construct a map with a layer absent, so every text
/// layer always has a position and a style.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerMap<T> {
    slots: [T; LayerId::COUNT],
}

impl<T> LayerMap<T> {
    /// Build a map by computing a value for each layer
    pub fn from_fn(mut f: impl FnMut(LayerId) -> T) -> Self {
        Self {
            slots: std::array::from_fn(|i| f(LayerId::ALL[i])),
        }
    }

    pub fn get(&self, layer: LayerId) -> &T {
        &self.slots[layer.index()]
    }

    pub fn get_mut(&mut self, layer: LayerId) -> &mut T {
        &mut self.slots[layer.index()]
    }

    /// Iterate in draw order
    pub fn iter(&self) -> impl Iterator<Item = (LayerId, &T)> + '_ {
        LayerId::ALL.into_iter().zip(self.slots.iter())
    }
}

impl<T> Index<LayerId> for LayerMap<T> {
    type Output = T;

    fn index(&self, layer: LayerId) -> &T {
        self.get(layer)
    }
}

impl<T> IndexMut<LayerId> for LayerMap<T> {
    fn index_mut(&mut self, layer: LayerId) -> &mut T {
        self.get_mut(layer)
    }
}

impl<T> TryFrom<BTreeMap<LayerId, T>> for LayerMap<T> {
    type Error = LayerMapError;

    fn try_from(mut map: BTreeMap<LayerId, T>) -> Result<Self, Self::Error> {
        let values = LayerId::ALL
            .iter()
            .map(|id| map.remove(id).ok_or(LayerMapError::Missing(*id)))
            .collect::<Result<Vec<_>, _>>()?;
        // Length equals LayerId::COUNT once every id was found
        let slots = values
            .try_into()
            .map_err(|_| LayerMapError::Missing(LayerId::ALL[0]))?;
        Ok(Self { slots })
    }
}

impl<T: Serialize> Serialize for LayerMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(LayerId::COUNT))?;
        for (id, value) in self.iter() {
            map.serialize_entry(&id, value)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for LayerMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<LayerId, T>::deserialize(deserializer)?;
        LayerMap::try_from(map).map_err(D::Error::custom)
    }
}
