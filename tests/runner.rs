use anyhow::Result;
use labour_etl::*;

fn key_of(x: &u32) -> PartitionKey {
    PartitionKey::new(Some(2000 + (*x % 3) as i32), if x % 2 == 0 { "even" } else { "odd" })
}

fn keep_non_multiples_of_five(x: &u32) -> Option<u32> {
    (x % 5 != 0).then_some(*x)
}

#[test]
fn sequential_and_parallel_group_identically() -> Result<()> {
    let input: Vec<u32> = (0..1_003).collect();

    let seq = Runner::sequential().run(input.clone(), keep_non_multiples_of_five, key_of)?;
    let modes = [
        (None, None),
        (Some(1), Some(1)),
        (Some(4), Some(7)),
        (None, Some(2_000)),
    ];
    for (threads, partitions) in modes {
        let par = Runner::parallel(threads, partitions).run(
            input.clone(),
            keep_non_multiples_of_five,
            key_of,
        )?;
        assert_eq!(par, seq, "threads={threads:?} partitions={partitions:?}");
    }
    Ok(())
}

#[test]
fn records_keep_input_order_within_a_partition() -> Result<()> {
    let input: Vec<u32> = (0..200).collect();
    let out = Runner::parallel(Some(3), Some(9)).run(input, |x| Some(*x), key_of)?;

    assert_eq!(out.len(), 6);
    for rows in out.values() {
        assert!(rows.windows(2).all(|w| w[0] < w[1]));
    }
    let total: usize = out.values().map(Vec::len).sum();
    assert_eq!(total, 200);
    Ok(())
}

#[test]
fn empty_input_yields_no_partitions() -> Result<()> {
    let out = Runner::default().run(Vec::<u32>::new(), |x| Some(*x), key_of)?;
    assert!(out.is_empty());
    Ok(())
}

#[test]
fn dropped_rows_do_not_create_partitions() -> Result<()> {
    let out = Runner::sequential().run(vec![1u32, 3, 5], |_| None::<u32>, key_of)?;
    assert!(out.is_empty());
    Ok(())
}

#[test]
fn default_mode_follows_feature() {
    let r = Runner::default();
    if cfg!(feature = "parallel-exec") {
        assert!(matches!(r.mode, ExecMode::Parallel { .. }));
    } else {
        assert_eq!(r.mode, ExecMode::Sequential);
    }
    assert!(r.default_partitions >= 4);
}
