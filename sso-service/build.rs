fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Client stubs are used by integration tests and relying parties
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile(&["../proto/sso.proto"], &["../proto"])?;

    Ok(())
}
