use mural_shared::models::PhotoRecord;

const DEFAULT_API_BASE: &str = "https://api-mural.onrender.com";

/// Pull the value following `flag` out of an argument list.
fn find_flag(args: &[String], flag: &str) -> Option<String> {
    args.iter().skip_while(|a| *a != flag).nth(1).cloned()
}

fn get_arg(flag: &str) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    find_flag(&args, flag)
}

fn usage() -> ! {
    eprintln!("Usage:");
    eprintln!("  mural list [--json] [--url <base>]");
    eprintln!("  mural post --image <path> --lat <latitude> --lon <longitude> [--url <base>]");
    std::process::exit(1);
}

/// One feed record per output line: id, coordinates (or a placeholder),
/// and the post date.
fn format_record_line(photo: &PhotoRecord) -> String {
    let coords = match photo.position() {
        Some((lat, lon)) => format!("{lat:.6}, {lon:.6}"),
        None => "sem coordenadas".to_string(),
    };
    let date = photo.created_at_pt().unwrap_or_else(|| "-".to_string());
    format!("#{} [{}] {}", photo.id, coords, date)
}

fn list(client: &reqwest::blocking::Client, base: &str, as_json: bool) {
    let url = format!("{}/photos", base.trim_end_matches('/'));
    eprintln!("Buscando fotos de {url}...");

    let resp = client.get(&url).send().unwrap_or_else(|e| {
        eprintln!("Falha na requisição: {e}");
        std::process::exit(1);
    });
    if !resp.status().is_success() {
        eprintln!("Erro HTTP: {}", resp.status().as_u16());
        std::process::exit(1);
    }

    let photos: Vec<PhotoRecord> = resp.json().unwrap_or_else(|e| {
        eprintln!("Resposta inválida: {e}");
        std::process::exit(1);
    });

    if as_json {
        match serde_json::to_string_pretty(&photos) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Falha ao serializar: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    if photos.is_empty() {
        println!("Nenhuma foto encontrada.");
        return;
    }
    for photo in &photos {
        println!("{}", format_record_line(photo));
    }
}

fn post(client: &reqwest::blocking::Client, base: &str, image_path: &str, lat: f64, lon: f64) {
    let bytes = std::fs::read(image_path).unwrap_or_else(|e| {
        eprintln!("Não foi possível ler {image_path}: {e}");
        std::process::exit(1);
    });

    // Same wire shape as the web client: image part named foto.jpg plus
    // the two coordinates as decimal strings.
    let part = reqwest::blocking::multipart::Part::bytes(bytes)
        .file_name("foto.jpg")
        .mime_str("image/jpeg")
        .unwrap_or_else(|e| {
            eprintln!("Falha ao montar o formulário: {e}");
            std::process::exit(1);
        });
    let form = reqwest::blocking::multipart::Form::new()
        .part("image", part)
        .text("latitude", lat.to_string())
        .text("longitude", lon.to_string());

    let url = format!("{}/photo", base.trim_end_matches('/'));
    eprintln!("Enviando {image_path} para {url}...");

    let resp = client.post(&url).multipart(form).send().unwrap_or_else(|e| {
        eprintln!("Falha na requisição: {e}");
        std::process::exit(1);
    });

    let status = resp.status();
    if status.is_success() {
        println!("Foto enviada (HTTP {}).", status.as_u16());
    } else {
        eprintln!("Erro na API: {}", status.as_u16());
        std::process::exit(1);
    }
}

fn required_coord(flag: &str) -> f64 {
    let raw = get_arg(flag).unwrap_or_else(|| {
        eprintln!("Error: {flag} <decimal> is required");
        usage();
    });
    raw.parse().unwrap_or_else(|_| {
        eprintln!("Error: {flag} must be a decimal number, got {raw}");
        std::process::exit(1);
    })
}

fn main() {
    let command = std::env::args().nth(1).unwrap_or_else(|| usage());
    let base = get_arg("--url").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    let client = reqwest::blocking::Client::new();

    let as_json = std::env::args().any(|a| a == "--json");

    match command.as_str() {
        "list" => list(&client, &base, as_json),
        "post" => {
            let image = get_arg("--image").unwrap_or_else(|| {
                eprintln!("Error: --image <path> is required");
                usage();
            });
            let lat = required_coord("--lat");
            let lon = required_coord("--lon");
            post(&client, &base, &image, lat, lon);
        }
        _ => usage(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_find_flag_extracts_value() {
        let argv = args(&["mural", "post", "--image", "a.jpg", "--lat", "-23.5"]);
        assert_eq!(find_flag(&argv, "--image").as_deref(), Some("a.jpg"));
        assert_eq!(find_flag(&argv, "--lat").as_deref(), Some("-23.5"));
    }

    #[test]
    fn test_find_flag_missing() {
        let argv = args(&["mural", "list"]);
        assert_eq!(find_flag(&argv, "--url"), None);
    }

    #[test]
    fn test_find_flag_at_end_without_value() {
        let argv = args(&["mural", "post", "--image"]);
        assert_eq!(find_flag(&argv, "--image"), None);
    }

    #[test]
    fn test_format_record_line_with_coordinates() {
        let photo = PhotoRecord {
            id: 1,
            image_url: Some("http://x/a.jpg".to_string()),
            latitude: Some(-23.5),
            longitude: Some(-46.6),
            created_at: Some("2024-01-01T00:00:00Z".to_string()),
        };
        assert_eq!(
            format_record_line(&photo),
            "#1 [-23.500000, -46.600000] 01/01/2024 00:00"
        );
    }

    #[test]
    fn test_format_record_line_without_coordinates() {
        let photo = PhotoRecord {
            id: 2,
            image_url: None,
            latitude: None,
            longitude: None,
            created_at: None,
        };
        assert_eq!(format_record_line(&photo), "#2 [sem coordenadas] -");
    }
}
