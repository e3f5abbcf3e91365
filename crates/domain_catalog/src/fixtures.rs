//! Seed catalog served by the in-memory adapter
//!
//! Mirrors the product list the storefront launched with. Prices are in USD.

use rust_decimal_macros::dec;

use core_kernel::{Currency, InsuranceId, Money};

use crate::insurance::{DurationUnit, Insurance, ProductIcon};

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    category: &str,
    short_description: &str,
    description: &str,
    base_price: Money,
    duration: DurationUnit,
    coverage: &[&str],
    image_url: &str,
    icon: ProductIcon,
) -> Insurance {
    Insurance {
        id: InsuranceId::new(id),
        name: name.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        short_description: short_description.to_string(),
        base_price,
        duration,
        coverage: coverage.iter().map(|c| c.to_string()).collect(),
        image_url: image_url.to_string(),
        icon,
    }
}

/// The six launch products, ins-001 through ins-006
pub fn mock_insurances() -> Vec<Insurance> {
    vec![
        product(
            "ins-001",
            "Seguro de Viaje",
            "Viaje",
            "Protección completa durante tus vacaciones",
            "Cobertura integral para tus viajes incluyendo asistencia médica, cancelación de vuelos, pérdida de equipaje y más. Actívalo solo cuando lo necesites.",
            Money::new(dec!(15.99), Currency::USD),
            DurationUnit::Day,
            &[
                "Asistencia médica hasta $50,000",
                "Cancelación de viaje",
                "Pérdida de equipaje hasta $2,000",
                "Retraso de vuelo",
                "Asistencia legal en el extranjero",
            ],
            "https://images.unsplash.com/photo-1513258728326-30cde8cf1071?fit=max&w=1080",
            ProductIcon::Plane,
        ),
        product(
            "ins-002",
            "Seguro de Dispositivos",
            "Tecnología",
            "Protege tu smartphone y gadgets",
            "Seguro contra robo, daños accidentales y fallas técnicas para tus dispositivos móviles. Activación instantánea.",
            Money::new(dec!(9.99), Currency::USD),
            DurationUnit::Month,
            &[
                "Robo y hurto",
                "Daños accidentales",
                "Daño por líquidos",
                "Fallas técnicas después de garantía",
                "Reemplazo en 48 horas",
            ],
            "https://images.unsplash.com/photo-1678164235182-bc7e9beef2a8?fit=max&w=1080",
            ProductIcon::Smartphone,
        ),
        product(
            "ins-003",
            "Seguro de Eventos",
            "Entretenimiento",
            "Asegura tu entrada a conciertos y eventos",
            "Protección para tus entradas a eventos. Si no puedes asistir por motivos justificados, recupera tu inversión.",
            Money::new(dec!(5.99), Currency::USD),
            DurationUnit::Event,
            &[
                "Cancelación del evento",
                "Emergencia médica",
                "Problemas de transporte",
                "Reembolso del 100% del ticket",
                "Cobertura de gastos de viaje",
            ],
            "https://images.unsplash.com/photo-1669670617524-5f08060c8dcc?fit=max&w=1080",
            ProductIcon::Ticket,
        ),
        product(
            "ins-004",
            "Seguro de Bicicleta",
            "Movilidad",
            "Protección para tu medio de transporte",
            "Cobertura completa para tu bicicleta contra robo, daños y accidentes. Ideal para ciclistas urbanos.",
            Money::new(dec!(12.99), Currency::USD),
            DurationUnit::Month,
            &[
                "Robo con violencia",
                "Daños por accidente",
                "Responsabilidad civil",
                "Asistencia en carretera",
                "Reemplazo de partes",
            ],
            "https://images.unsplash.com/photo-1726543638998-f792eb7d081a?fit=max&w=1080",
            ProductIcon::Bike,
        ),
        product(
            "ins-005",
            "Seguro de Mascotas",
            "Mascotas",
            "Cuidado veterinario para tu mejor amigo",
            "Cobertura de gastos veterinarios, emergencias y tratamientos para tu mascota. Actívalo cuando lo necesites.",
            Money::new(dec!(19.99), Currency::USD),
            DurationUnit::Month,
            &[
                "Consultas veterinarias",
                "Emergencias médicas",
                "Cirugías",
                "Medicamentos",
                "Hospitalización",
            ],
            "https://images.unsplash.com/photo-1668993022779-71f5a7d34b97?fit=max&w=1080",
            ProductIcon::Heart,
        ),
        product(
            "ins-006",
            "Seguro de Equipaje",
            "Viaje",
            "Protege tus pertenencias en tránsito",
            "Cobertura específica para pérdida, robo o daño de equipaje durante viajes. Activación on-demand.",
            Money::new(dec!(7.99), Currency::USD),
            DurationUnit::Trip,
            &[
                "Pérdida de equipaje",
                "Robo de pertenencias",
                "Daños durante el transporte",
                "Retraso de equipaje",
                "Artículos de valor",
            ],
            "https://images.unsplash.com/photo-1718128120413-783e25de9a3b?fit=max&w=1080",
            ProductIcon::Luggage,
        ),
    ]
}
