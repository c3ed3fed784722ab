//! Enumeraciones de valores cerrados que se guardan como VARCHAR
//!
//! Cada enumeración conoce su valor persistido (`as_str`), su etiqueta en
//! español (`label`) y se puede parsear desde el query string.

/// Declara un enum de opciones con valor persistido y etiqueta visible
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => ($value:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            /// Etiqueta para un valor persistido; el propio valor si no se reconoce
            pub fn label_for(value: &str) -> String {
                value
                    .parse::<$name>()
                    .map(|choice| choice.label().to_string())
                    .unwrap_or_else(|_| value.to_string())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($value => Ok($name::$variant),)+
                    other => Err(format!("Valor no reconocido para {}: {}", stringify!($name), other)),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

choice_enum! {
    /// Tipo de establecimiento
    pub enum EstablishmentKind {
        Hotel => ("hotel", "Hotel"),
        Restaurante => ("restaurante", "Restaurante"),
        Cafe => ("cafe", "Cafetería"),
        Bar => ("bar", "Bar"),
        Otro => ("otro", "Otro"),
    }
}

choice_enum! {
    /// Rango de precios de un establecimiento
    pub enum PriceRange {
        Economico => ("$", "Económico"),
        Moderado => ("$$", "Moderado"),
        Costoso => ("$$$", "Costoso"),
    }
}

choice_enum! {
    /// Medio de transporte
    pub enum TransportKind {
        Bus => ("bus", "Bus/Buseta"),
        Taxi => ("taxi", "Taxi"),
        Moto => ("moto", "Mototaxi"),
        Bicicleta => ("bicicleta", "Bicicleta"),
        Caminata => ("caminata", "Caminata"),
        VehiculoPropio => ("vehiculo_propio", "Vehículo propio"),
        Tour => ("tour", "Tour organizado"),
        Otro => ("otro", "Otro"),
    }
}

choice_enum! {
    /// Categoría de artesanía
    pub enum CraftCategory {
        Ceramica => ("ceramica", "Cerámica"),
        Textil => ("textil", "Textil"),
        Madera => ("madera", "Madera"),
        Cuero => ("cuero", "Cuero"),
        Metal => ("metal", "Metal"),
        Piedra => ("piedra", "Piedra"),
        Fibra => ("fibra", "Fibras naturales"),
        Joyeria => ("joyeria", "Joyería"),
        Otro => ("otro", "Otro"),
    }
}

choice_enum! {
    /// Tipo de actividad física
    pub enum ActivityKind {
        Senderismo => ("senderismo", "Senderismo"),
        Escalada => ("escalada", "Escalada"),
        Ciclismo => ("ciclismo", "Ciclismo"),
        Natacion => ("natacion", "Natación"),
        Kayak => ("kayak", "Kayak"),
        Rafting => ("rafting", "Rafting"),
        Parapente => ("parapente", "Parapente"),
        Cabalgata => ("cabalgata", "Cabalgata"),
        Canopy => ("canopy", "Canopy"),
        Rappel => ("rappel", "Rappel"),
        Camping => ("camping", "Camping"),
        Avistamiento => ("avistamiento", "Avistamiento de aves"),
        Otro => ("otro", "Otro"),
    }
}

choice_enum! {
    /// Nivel de exigencia de una actividad física
    pub enum ActivityLevel {
        Principiante => ("principiante", "Principiante"),
        Intermedio => ("intermedio", "Intermedio"),
        Avanzado => ("avanzado", "Avanzado"),
        Experto => ("experto", "Experto"),
    }
}

impl ActivityLevel {
    /// Clase de badge según el nivel
    pub fn badge(&self) -> &'static str {
        match self {
            ActivityLevel::Principiante => "success",
            ActivityLevel::Intermedio => "warning",
            ActivityLevel::Avanzado => "danger",
            ActivityLevel::Experto => "dark",
        }
    }

    /// Badge para un valor persistido, "primary" si no se reconoce
    pub fn badge_for(value: &str) -> &'static str {
        value
            .parse::<ActivityLevel>()
            .map(|level| level.badge())
            .unwrap_or("primary")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_round_trip_through_str() {
        for kind in TransportKind::ALL {
            assert_eq!(kind.as_str().parse::<TransportKind>(), Ok(*kind));
        }
        assert!("avion".parse::<TransportKind>().is_err());
    }

    #[test]
    fn test_serde_uses_persisted_value() {
        let json = serde_json::to_string(&PriceRange::Moderado).unwrap();
        assert_eq!(json, "\"$$\"");
        let kind: EstablishmentKind = serde_json::from_str("\"restaurante\"").unwrap();
        assert_eq!(kind, EstablishmentKind::Restaurante);
    }

    #[test]
    fn test_labels() {
        assert_eq!(EstablishmentKind::label_for("cafe"), "Cafetería");
        assert_eq!(EstablishmentKind::label_for("desconocido"), "desconocido");
        assert_eq!(TransportKind::VehiculoPropio.to_string(), "vehiculo_propio");
    }

    #[test]
    fn test_activity_level_badges() {
        assert_eq!(ActivityLevel::badge_for("principiante"), "success");
        assert_eq!(ActivityLevel::badge_for("intermedio"), "warning");
        assert_eq!(ActivityLevel::badge_for("avanzado"), "danger");
        assert_eq!(ActivityLevel::badge_for("experto"), "dark");
        assert_eq!(ActivityLevel::badge_for("otro"), "primary");
    }
}
