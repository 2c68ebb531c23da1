use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use dispatch_geo::{coordinates::GeoPoint, haversine::AsTheCrowFliesEstimator};
use dispatch_optimizer::{
    problem::{
        dispatch_problem::{DispatchProblem, DispatchProblemBuilder},
        driver::DriverBuilder,
        license_class::LicenseClass,
        ride::RideBuilder,
        shift_window::ShiftWindow,
    },
    solver::{
        dispatch_options::DispatchOptions, greedy_chaining::GreedyChaining, strategy::Strategy,
        unchained::Unchained,
    },
};
use rand::{Rng, SeedableRng, rngs::SmallRng};

fn random_point(rng: &mut SmallRng) -> GeoPoint {
    GeoPoint::new(
        rng.random_range(48.75..48.95),
        rng.random_range(2.20..2.50),
    )
}

fn random_problem(num_drivers: usize, num_rides: usize) -> DispatchProblem {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut builder = DispatchProblemBuilder::default();

    for i in 0..num_drivers {
        let mut driver = DriverBuilder::default();
        let large = rng.random_bool(0.2);
        driver
            .set_driver_id(format!("driver_{i}"))
            .set_license_class(if large { LicenseClass::D1 } else { LicenseClass::B })
            .set_seats(if large { 16 } else { 8 })
            .set_fuel_cost_per_km(rng.random_range(1.0..3.0))
            .set_location(random_point(&mut rng));

        let shift_start = rng.random_range(5..10) * 60;
        driver.add_shift_window(ShiftWindow::new(shift_start, shift_start + 8 * 60).unwrap());

        builder.add_driver(driver.build().unwrap());
    }

    for i in 0..num_rides {
        let mut ride = RideBuilder::default();
        let start = rng.random_range(6 * 60..20 * 60);
        ride.set_ride_id(format!("ride_{i}"))
            .set_date(jiff::civil::date(2025, 11, 30))
            .set_start(start)
            .set_end(start + rng.random_range(15..90))
            .set_pickup(random_point(&mut rng))
            .set_dropoff(random_point(&mut rng))
            .set_passengers(rng.random_range(1..14));

        builder.add_ride(ride.build().unwrap());
    }

    builder.build().unwrap()
}

fn strategies_benchmark(c: &mut Criterion) {
    let problem = random_problem(50, 500);
    let estimator = AsTheCrowFliesEstimator::default();
    let options = DispatchOptions {
        include_deadhead_time: true,
        include_deadhead_fuel: true,
        ..DispatchOptions::default()
    };

    c.bench_function("greedy chaining 50x500", |b| {
        b.iter(|| {
            GreedyChaining
                .run(black_box(&problem), &options, &estimator)
                .unwrap()
        })
    });

    c.bench_function("unchained 50x500", |b| {
        b.iter(|| {
            Unchained
                .run(black_box(&problem), &options, &estimator)
                .unwrap()
        })
    });
}

criterion_group!(benches, strategies_benchmark);
criterion_main!(benches);
