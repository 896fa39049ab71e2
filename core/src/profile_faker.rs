//! Deterministic personal-profile generation using curated Indian lists.
//!
//! Everything here draws from a caller-supplied stream, so the same seed
//! yields the same people. Dates are expressed as offsets back from a
//! fixed reference date rather than the wall clock.

use crate::rng::StreamRng;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

pub struct ProfileFaker;

impl ProfileFaker {
    /// First name matching the gender code ("M" or "F").
    pub fn first_name(rng: &mut StreamRng, gender: &str) -> &'static str {
        if gender == "F" {
            rng.pick(Self::female_first_names())
        } else {
            rng.pick(Self::male_first_names())
        }
    }

    pub fn last_name(rng: &mut StreamRng) -> &'static str {
        rng.pick(Self::last_names())
    }

    /// Full name of either gender, for contacts and officials.
    pub fn full_name(rng: &mut StreamRng) -> String {
        let gender = if rng.next_u64_below(2) == 0 { "M" } else { "F" };
        let first = Self::first_name(rng, gender);
        format!("{} {}", first, Self::last_name(rng))
    }

    /// Mobile number in `+91 XXXXXXXXXX` form.
    pub fn phone(rng: &mut StreamRng) -> String {
        format!("+91 {}", rng.range_inclusive(7_000_000_000, 9_999_999_999))
    }

    pub fn city(rng: &mut StreamRng) -> &'static str {
        rng.pick(Self::cities())
    }

    /// "<house>, <street>, <city>"
    pub fn address(rng: &mut StreamRng) -> String {
        let house = rng.range_inclusive(1, 999);
        let street = rng.pick(Self::streets());
        format!("{house}, {street}, {}", Self::city(rng))
    }

    pub fn postal_code(rng: &mut StreamRng) -> String {
        rng.range_inclusive(100_000, 999_999).to_string()
    }

    /// A date between `max_days_back` and `min_days_back` days before
    /// `reference`, inclusive.
    pub fn date_between(
        rng: &mut StreamRng,
        reference: NaiveDate,
        max_days_back: i64,
        min_days_back: i64,
    ) -> NaiveDate {
        let days_back = rng.range_inclusive(min_days_back, max_days_back);
        reference - Duration::days(days_back)
    }

    /// A time of day in `[start_hour, end_hour)`, to the minute.
    pub fn time_between(rng: &mut StreamRng, start_hour: u32, end_hour: u32) -> NaiveTime {
        let start = i64::from(start_hour) * 60;
        let end = i64::from(end_hour) * 60 - 1;
        let minute_of_day = rng.range_inclusive(start, end.max(start));
        NaiveTime::from_num_seconds_from_midnight_opt(minute_of_day as u32 * 60, 0)
            .unwrap_or_default()
    }

    pub fn datetime_on(rng: &mut StreamRng, date: NaiveDate) -> NaiveDateTime {
        date.and_time(Self::time_between(rng, 8, 22))
    }

    /// Assessor badge id, `ASST01` to `ASST20`.
    pub fn assessor_id(rng: &mut StreamRng) -> String {
        format!("ASST{:02}", rng.range_inclusive(1, 20))
    }

    fn male_first_names() -> &'static [&'static str] {
        &[
            "Aarav", "Vivaan", "Aditya", "Vihaan", "Arjun", "Sai", "Reyansh", "Ayaan",
            "Krishna", "Ishaan", "Shaurya", "Atharv", "Advik", "Pranav", "Rishabh",
            "Gokul", "Rohan", "Kiran", "Aryan", "Advait", "Vikram", "Ankit", "Rahul",
            "Amit", "Suresh", "Rajesh", "Deepak", "Manoj", "Ravi", "Ashok",
        ]
    }

    fn female_first_names() -> &'static [&'static str] {
        &[
            "Saanvi", "Ananya", "Diya", "Aadhya", "Kiara", "Anika", "Avni", "Sara",
            "Myra", "Aditi", "Kavya", "Sia", "Ira", "Pihu", "Riya", "Arya", "Tara",
            "Siya", "Nisha", "Priya", "Meera", "Pooja", "Neha", "Sita", "Geeta",
            "Sunita", "Kavita", "Anita", "Seema", "Rekha",
        ]
    }

    fn last_names() -> &'static [&'static str] {
        &[
            "Sharma", "Verma", "Gupta", "Agarwal", "Bansal", "Garg", "Jain", "Mittal",
            "Shah", "Patel", "Singh", "Kumar", "Yadav", "Mishra", "Pandey", "Tiwari",
            "Shukla", "Dubey", "Saxena", "Srivastava", "Chandra", "Iyer", "Nair",
            "Reddy", "Rao", "Pillai", "Menon", "Das", "Roy", "Ghosh",
        ]
    }

    fn cities() -> &'static [&'static str] {
        &[
            "Mumbai", "Delhi", "Bangalore", "Hyderabad", "Chennai", "Kolkata", "Pune",
            "Ahmedabad", "Surat", "Jaipur", "Lucknow", "Kanpur", "Nagpur",
            "Visakhapatnam", "Indore", "Thane", "Bhopal", "Patna", "Vadodara",
            "Ghaziabad", "Ludhiana", "Coimbatore", "Madurai", "Vijayawada",
        ]
    }

    fn streets() -> &'static [&'static str] {
        &[
            "MG Road", "Gandhi Nagar", "Nehru Street", "Rajaji Road", "Anna Salai",
            "Brigade Road", "Commercial Street", "Park Street", "Church Street",
            "Ring Road", "Civil Lines", "Model Town",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, StreamSlot};

    fn rng(seed: u64) -> StreamRng {
        RngBank::new(seed).for_stream(StreamSlot::EmployeeProfile)
    }

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    #[test]
    fn names_are_deterministic() {
        let a: Vec<String> = {
            let mut r = rng(12345);
            (0..20).map(|_| ProfileFaker::full_name(&mut r)).collect()
        };
        let b: Vec<String> = {
            let mut r = rng(12345);
            (0..20).map(|_| ProfileFaker::full_name(&mut r)).collect()
        };
        assert_eq!(a, b, "same seed should produce same names");
    }

    #[test]
    fn first_name_follows_gender() {
        let mut r = rng(1);
        for _ in 0..50 {
            let female = ProfileFaker::first_name(&mut r, "F");
            assert!(ProfileFaker::female_first_names().contains(&female));
            let male = ProfileFaker::first_name(&mut r, "M");
            assert!(ProfileFaker::male_first_names().contains(&male));
        }
    }

    #[test]
    fn names_and_places_come_from_curated_lists() {
        let mut r = rng(21);
        for _ in 0..50 {
            let last: &'static str = ProfileFaker::last_name(&mut r);
            assert!(ProfileFaker::last_names().contains(&last), "{last}");
            let city: &'static str = ProfileFaker::city(&mut r);
            assert!(ProfileFaker::cities().contains(&city), "{city}");
            let address = ProfileFaker::address(&mut r);
            assert!(
                ProfileFaker::streets().iter().any(|street| address.contains(street)),
                "{address}"
            );
        }
    }

    #[test]
    fn phones_and_postal_codes_are_well_formed() {
        let mut r = rng(9);
        for _ in 0..100 {
            let phone = ProfileFaker::phone(&mut r);
            assert!(phone.starts_with("+91 "), "{phone}");
            assert_eq!(phone.len(), 14, "{phone}");
            let pin = ProfileFaker::postal_code(&mut r);
            assert_eq!(pin.len(), 6, "{pin}");
        }
    }

    #[test]
    fn dates_stay_inside_window() {
        let mut r = rng(4);
        let earliest = reference() - Duration::days(182);
        let latest = reference() - Duration::days(91);
        for _ in 0..200 {
            let d = ProfileFaker::date_between(&mut r, reference(), 182, 91);
            assert!(d >= earliest && d <= latest, "{d} outside window");
        }
    }

    #[test]
    fn times_stay_inside_hours() {
        let mut r = rng(5);
        let open = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let close = NaiveTime::from_hms_opt(17, 0, 0).unwrap();
        for _ in 0..200 {
            let t = ProfileFaker::time_between(&mut r, 9, 17);
            assert!(t >= open && t < close, "{t} outside office hours");
        }
    }
}
