use tlm_extract::prelude::*;

fn main() -> Result<(), TlmError> {
    env_logger::init();

    // Reference seven-gap structure measured at 5 V; the 9 μm gap was not probed.
    let config = AnalysisConfig::default();
    let layout = config.layout()?;
    let conditions = config.conditions()?;
    let entries = layout.entries([
        Some("40"),
        Some("32"),
        Some("23"),
        Some("17"),
        None,
        Some("11"),
        Some("7"),
    ]);

    let samples = validate(&entries, &config.validation)?;
    let result = extract(&samples, &conditions)?;

    println!("{}", data_table(&samples, &conditions));
    println!("{}", summary(&result));

    let [(d0, r0), (d1, r1)] = result.fit_segment();
    println!("fit segment: ({d0}, {r0:.2}) -> ({d1}, {r1:.2})");

    let mut history = MemoryHistory::default();
    let id = history.save(NewRecord::from_analysis("Sample A", &samples, &conditions))?;
    println!("saved {}", history.get(id)?.label());
    Ok(())
}
