use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "#{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }
    };
}

id_type!(
    /// Identifier of a playable character (including variants such as alternate forms).
    CharacterId
);
id_type!(
    /// Identifier of a costume, unique across all characters.
    CostumeId
);
id_type!(
    /// Identifier of a slot, unique across all costumes.
    SlotId
);
id_type!(
    /// Identifier of a memory (equippable item).
    MemoryId
);
