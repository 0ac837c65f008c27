//! Python source fixtures

/// `n` lines of top-level statements that use each other (no alerts)
pub fn fixture_n_lines(n: usize) -> String {
    (0..n).map(|_| "print(1)\n").collect()
}

/// A documented function spanning exactly `n` lines (n >= 3)
///
/// The `def` line, a docstring, `n - 3` filler statements and a `return`.
pub fn fixture_function_of_length(name: &str, n: usize) -> String {
    assert!(n >= 3, "a documented function needs at least 3 lines");
    let filler: String = (0..n - 3).map(|i| format!("    print({i})\n")).collect();
    format!("def {name}():\n    \"\"\"Doc.\"\"\"\n{filler}    return None\n")
}

/// A function with the given first body statement
pub fn fixture_function_with_first_statement(statement: &str) -> String {
    format!("def f():\n    {statement}\n    return None\n")
}
