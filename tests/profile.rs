use std::io::Write;

use stellar_accretion::profile::{ProfileError, ProfileSample, StellarProfile};

fn three_shell_profile() -> StellarProfile {
    StellarProfile::new(vec![
        ProfileSample {
            radius_fraction: 0.1,
            density_kg_m3: 100.0,
            mass_fraction: 0.01,
        },
        ProfileSample {
            radius_fraction: 0.5,
            density_kg_m3: 10.0,
            mass_fraction: 0.5,
        },
        ProfileSample {
            radius_fraction: 1.0,
            density_kg_m3: 1.0,
            mass_fraction: 1.0,
        },
    ])
    .expect("valid profile")
}

#[test]
fn lookup_uses_leftmost_shell_at_or_above_radius() {
    let profile = three_shell_profile();
    assert_eq!(profile.density_at(0.3), 10.0);
    assert_eq!(profile.density_at(0.05), 100.0);
    // exact ties land on the matching shell
    assert_eq!(profile.density_at(0.1), 100.0);
    assert_eq!(profile.density_at(0.5), 10.0);
    assert_eq!(profile.density_at(0.75), 1.0);
    assert_eq!(profile.mass_fraction_at(0.3), 0.5);
    assert_eq!(profile.mass_fraction_at(0.75), 1.0);
}

#[test]
fn outside_the_star_density_is_zero_and_all_mass_is_enclosed() {
    let profile = three_shell_profile();
    for r in [1.0, 1.0 + f64::EPSILON, 1.5, 10.0, 1.0e9] {
        assert_eq!(profile.density_at(r), 0.0, "density at r = {r}");
        assert_eq!(profile.mass_fraction_at(r), 1.0, "mass fraction at r = {r}");
    }
}

#[test]
fn innermost_shell_reports_no_enclosed_mass() {
    let profile = three_shell_profile();
    assert_eq!(profile.mass_fraction_at(0.0), 0.0);
    assert_eq!(profile.mass_fraction_at(1.0e-12), 0.0);
    assert_eq!(profile.mass_fraction_at(0.1), 0.0);
    assert_eq!(profile.mass_fraction_at(0.1 + 1.0e-9), 0.5);
}

#[test]
fn mass_fraction_never_decreases_outward() {
    for profile in [
        three_shell_profile(),
        StellarProfile::from_csv_path("data/sun_stats.csv").expect("bundled profile"),
    ] {
        let mut previous = profile.mass_fraction_at(0.0);
        for i in 0..=1_500 {
            let r = i as f64 * 0.001;
            let current = profile.mass_fraction_at(r);
            assert!(
                current >= previous,
                "mass fraction dropped from {previous} to {current} at r = {r}"
            );
            previous = current;
        }
    }
}

#[test]
fn csv_loader_converts_density_and_ignores_other_columns() {
    let mut file = tempfile::NamedTempFile::new().expect("temp csv");
    writeln!(file, "# reduced standard model").unwrap();
    writeln!(file, "M/Msun,R/Rsun,T,Rho,P,L/Lsun").unwrap();
    writeln!(file, "0.01, 0.1, 1.5e7, 0.1, 2.0e17, 0.05").unwrap();
    writeln!(file, "0.5, 0.5, 4.0e6, 0.01, 1.0e15, 0.99").unwrap();
    writeln!(file, "1.0, 1.0, 5.8e3, 0.001, 1.0e5, 1.0").unwrap();
    file.flush().unwrap();

    let profile = StellarProfile::from_csv_path(file.path()).expect("csv profile");
    assert_eq!(profile.len(), 3);
    assert_eq!(profile.max_radius_fraction(), 1.0);
    assert!((profile.density_at(0.3) - 10.0).abs() < 1e-9);
    assert!((profile.density_at(0.05) - 100.0).abs() < 1e-9);
    assert_eq!(profile.mass_fraction_at(0.3), 0.5);
}

#[test]
fn csv_loader_accepts_descriptive_headers() {
    let csv = "radius_fraction,density_g_cm3,mass_fraction\n0.2,1.0,0.1\n1.0,0.5,1.0\n";
    let profile = StellarProfile::from_csv_reader(csv.as_bytes()).expect("profile");
    assert_eq!(profile.radius_fractions().collect::<Vec<_>>(), vec![0.2, 1.0]);
    assert_eq!(profile.samples()[0].density_kg_m3, 1_000.0);
}

#[test]
fn csv_loader_rejects_bad_tables() {
    let missing = "M/Msun,R/Rsun\n0.1,0.1\n";
    assert!(matches!(
        StellarProfile::from_csv_reader(missing.as_bytes()),
        Err(ProfileError::MissingColumn("Rho"))
    ));

    let empty = "M/Msun,R/Rsun,Rho\n";
    assert!(matches!(
        StellarProfile::from_csv_reader(empty.as_bytes()),
        Err(ProfileError::Empty)
    ));

    let unsorted = "M/Msun,R/Rsun,Rho\n0.1,0.5,1.0\n0.2,0.2,1.0\n";
    assert!(matches!(
        StellarProfile::from_csv_reader(unsorted.as_bytes()),
        Err(ProfileError::Unsorted { row: 1, .. })
    ));

    let duplicate = "M/Msun,R/Rsun,Rho\n0.1,0.5,1.0\n0.2,0.5,1.0\n";
    assert!(matches!(
        StellarProfile::from_csv_reader(duplicate.as_bytes()),
        Err(ProfileError::Unsorted { row: 1, .. })
    ));

    let shrinking = "M/Msun,R/Rsun,Rho\n0.3,0.2,1.0\n0.2,0.5,1.0\n";
    assert!(matches!(
        StellarProfile::from_csv_reader(shrinking.as_bytes()),
        Err(ProfileError::DecreasingMass { row: 1, .. })
    ));

    let garbage = "M/Msun,R/Rsun,Rho\n0.3,0.2,dense\n";
    assert!(matches!(
        StellarProfile::from_csv_reader(garbage.as_bytes()),
        Err(ProfileError::InvalidValue { row: 0, column: "Rho", .. })
    ));
}

#[test]
fn bundled_solar_profile_is_well_formed() {
    let profile = StellarProfile::from_csv_path("data/sun_stats.csv").expect("bundled profile");
    assert!(profile.len() > 100);
    assert_eq!(profile.max_radius_fraction(), 1.0);
    let core_density = profile.density_at(0.0);
    assert!(
        (1.0e5..2.0e5).contains(&core_density),
        "core density {core_density} kg/m^3"
    );
    assert_eq!(profile.mass_fraction_at(0.0), 0.0);
    assert!(profile.mass_fraction_at(0.25) > 0.4 && profile.mass_fraction_at(0.25) < 0.8);
}
