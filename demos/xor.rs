use backprop_net::random::seeded;
use backprop_net::{train_network, Network, NetworkConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = NetworkConfig::default().with_momentum(NetworkConfig::DEFAULT_MOMENTUM);
    let mut network = Network::new(&[2, 4, 1], config, &mut seeded(2024))?;

    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let expected_outputs = vec![
        vec![1.0],
        vec![0.0],
        vec![1.0],
        vec![0.0],
    ];

    let epochs = 2000;

    for epoch in 0..epochs {
        let loss = train_network(&mut network, &inputs, &expected_outputs)?;
        if epoch % 200 == 0 {
            println!(
                "Epoch {epoch}: rms = {loss:.6}, recent average = {:.6}",
                network.smoothed_error()
            );
        }
    }

    for input in &inputs {
        network.feed_forward(input)?;
        println!("Input: {:?} -> Output: {:.4}", input, network.read_outputs()[0]);
    }
    Ok(())
}
