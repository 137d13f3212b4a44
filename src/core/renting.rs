use super::timeline::months_of_year;
use super::types::{RentingInputs, RentingMonth};

#[derive(Debug, Clone)]
pub struct RentingYear {
    pub year: u32,
    pub total_rent: f64,
    /// Rent charged each month of this year; zero for year 0.
    pub monthly_rent: f64,
    pub months: Vec<RentingMonth>,
}

#[derive(Debug, Clone)]
pub struct RentingSchedule {
    pub years: Vec<RentingYear>,
}

/// Rent paid in years `0..=horizon_years`. Rent steps up once per full year.
pub fn simulate_renting(renting: &RentingInputs, horizon_years: u32) -> RentingSchedule {
    let mut years = Vec::with_capacity(horizon_years as usize + 1);
    years.push(RentingYear {
        year: 0,
        total_rent: 0.0,
        monthly_rent: 0.0,
        months: Vec::new(),
    });

    let mut monthly_rent = renting.monthly_rent;
    for year in 1..=horizon_years {
        let months = months_of_year(year)
            .map(|index| RentingMonth {
                month: index.month_of_year(),
                rent: monthly_rent,
            })
            .collect::<Vec<_>>();
        years.push(RentingYear {
            year,
            total_rent: months.iter().map(|m| m.rent).sum(),
            monthly_rent,
            months,
        });
        monthly_rent *= 1.0 + renting.annual_rent_increase / 100.0;
    }

    RentingSchedule { years }
}
