//! End-to-end add flow against a local registry checkout: resolve a component
//! with cross-kind dependencies, fetch its files, rewrite imports, and write
//! them into a project tree.

use std::fs;
use std::path::Path;

use spaceui::config::Config;
use spaceui::install::{InstallOptions, Installer};
use spaceui::registry::manifest::EntityKind;
use spaceui::registry::source::RegistryClient;

/// A registry with a component that pulls in another component, a provider
/// chain, and a util that itself depends on a provider.
fn write_registry(root: &Path) {
    for dir in [
        "src/components/ui",
        "src/components",
        "src/providers",
        "src/lib",
        "src/hooks",
    ] {
        fs::create_dir_all(root.join(dir)).unwrap();
    }

    fs::write(
        root.join("registry.json"),
        r#"{
            "$schema": "https://ui.spaceinvoices.com/schema/registry.json",
            "name": "spaceui",
            "description": "Space Invoices UI registry",
            "baseUrl": "https://ui.spaceinvoices.com",
            "categories": {
                "invoices": { "name": "Invoices", "description": "Invoicing flows" },
                "primitives": { "name": "Primitives", "description": "Building blocks" }
            },
            "utils": {
                "format-currency": {
                    "name": "Format Currency",
                    "files": ["lib/format-currency.ts"],
                    "dependencies": ["providers/settings-provider"]
                }
            },
            "providers": {
                "sdk-provider": {
                    "name": "SDK Provider",
                    "files": ["providers/sdk-provider.tsx"],
                    "dependencies": ["settings-provider"],
                    "npmDependencies": ["@spaceinvoices/space-js"]
                },
                "settings-provider": {
                    "name": "Settings Provider",
                    "files": ["providers/settings-provider.tsx"]
                }
            },
            "components": {
                "button": {
                    "name": "Button",
                    "category": "primitives",
                    "files": ["components/ui/button.tsx"],
                    "npmDependencies": ["clsx"]
                },
                "invoices/create-invoice-form": {
                    "name": "Create Invoice Form",
                    "category": "invoices",
                    "files": ["components/create-invoice-form.tsx"],
                    "dependencies": ["button"],
                    "providers": ["sdk-provider"],
                    "utils": ["utils/format-currency"],
                    "npmDependencies": ["react-hook-form", "clsx"]
                }
            }
        }"#,
    )
    .unwrap();

    fs::write(
        root.join("src/components/create-invoice-form.tsx"),
        "\
import { Button } from '@/ui/components/ui/button';
import { SdkProvider } from '@/ui/providers/sdk-provider';
import { formatCurrency } from '@/ui/lib/format-currency';
export const CreateInvoiceForm = () => null;
",
    )
    .unwrap();
    fs::write(
        root.join("src/components/ui/button.tsx"),
        "export const Button = () => null;\n",
    )
    .unwrap();
    fs::write(
        root.join("src/providers/sdk-provider.tsx"),
        "import { SettingsProvider } from '@/ui/providers/settings-provider';\nexport const SdkProvider = () => null;\n",
    )
    .unwrap();
    fs::write(
        root.join("src/providers/settings-provider.tsx"),
        "export const SettingsProvider = () => null;\n",
    )
    .unwrap();
    fs::write(
        root.join("src/lib/format-currency.ts"),
        "export const formatCurrency = (n: number) => `${n}`;\n",
    )
    .unwrap();

    fs::write(root.join("src/hooks/.gitkeep"), "").unwrap();
}

#[tokio::test]
async fn add_installs_component_with_full_dependency_closure() {
    let registry = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    write_registry(registry.path());

    let client = RegistryClient::local(registry.path().to_path_buf());
    let config = Config::with_defaults();
    config.save(project.path()).unwrap();

    let installer = Installer::new(&client, &config, project.path());
    let plan = installer
        .plan(&["invoices/create-invoice-form".to_string()])
        .await
        .unwrap();

    // Topological order: everything precedes the requested component, and the
    // provider chain precedes both the util and the sdk provider.
    let order: Vec<(EntityKind, &str)> = plan
        .items
        .iter()
        .map(|i| (i.kind, i.key.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            (EntityKind::Component, "button"),
            (EntityKind::Provider, "settings-provider"),
            (EntityKind::Provider, "sdk-provider"),
            (EntityKind::Util, "format-currency"),
            (EntityKind::Component, "invoices/create-invoice-form"),
        ]
    );
    assert_eq!(
        plan.all_npm_dependencies,
        vec!["clsx", "@spaceinvoices/space-js", "react-hook-form"]
    );

    let outcome = installer
        .materialize(&plan, InstallOptions::default())
        .await
        .unwrap();
    assert_eq!(outcome.written(), 5);

    // Files land at the configured aliases.
    let form = project
        .path()
        .join("src/components/space-invoices/create-invoice-form.tsx");
    let button = project.path().join("src/components/ui/button.tsx");
    let sdk = project.path().join("src/providers/sdk-provider.tsx");
    let lib = project.path().join("src/lib/format-currency.ts");
    for path in [&form, &button, &sdk, &lib] {
        assert!(path.exists(), "missing {}", path.display());
    }

    // Imports were rewritten, with the ui prefix taking precedence over the
    // components prefix.
    let form_src = fs::read_to_string(&form).unwrap();
    assert!(form_src.contains("from '@/components/ui/button'"), "{form_src}");
    assert!(form_src.contains("from '@/providers/sdk-provider'"), "{form_src}");
    assert!(form_src.contains("from '@/lib/format-currency'"), "{form_src}");
    assert!(!form_src.contains("@/ui/"), "{form_src}");

    let sdk_src = fs::read_to_string(&sdk).unwrap();
    assert!(sdk_src.contains("from '@/providers/settings-provider'"), "{sdk_src}");
}

#[tokio::test]
async fn add_with_custom_aliases_rehomes_everything() {
    let registry = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    write_registry(registry.path());

    let client = RegistryClient::local(registry.path().to_path_buf());
    let mut config = Config::with_defaults();
    config.aliases.ui = "@/design/primitives".to_string();
    config.aliases.components = "@/features/invoicing".to_string();

    let installer = Installer::new(&client, &config, project.path());
    let plan = installer
        .plan(&["invoices/create-invoice-form".to_string()])
        .await
        .unwrap();
    installer
        .materialize(&plan, InstallOptions::default())
        .await
        .unwrap();

    let form = project
        .path()
        .join("src/features/invoicing/create-invoice-form.tsx");
    assert!(project
        .path()
        .join("src/design/primitives/button.tsx")
        .exists());
    let form_src = fs::read_to_string(form).unwrap();
    assert!(form_src.contains("from '@/design/primitives/button'"), "{form_src}");
}

#[tokio::test]
async fn rerunning_add_skips_unchanged_files() {
    let registry = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    write_registry(registry.path());

    let client = RegistryClient::local(registry.path().to_path_buf());
    let config = Config::with_defaults();
    let installer = Installer::new(&client, &config, project.path());

    let plan = installer.plan(&["button".to_string()]).await.unwrap();
    let first = installer
        .materialize(&plan, InstallOptions::default())
        .await
        .unwrap();
    assert_eq!(first.written(), 1);

    let second = installer
        .materialize(&plan, InstallOptions::default())
        .await
        .unwrap();
    assert_eq!(second.written(), 0);
    assert_eq!(second.skipped(), 1);
}

#[tokio::test]
async fn unknown_component_fails_before_touching_the_project() {
    let registry = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    write_registry(registry.path());

    let client = RegistryClient::local(registry.path().to_path_buf());
    let config = Config::with_defaults();
    let installer = Installer::new(&client, &config, project.path());

    let err = installer
        .plan(&["invoices/delete-everything".to_string()])
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Component \"invoices/delete-everything\" not found in registry"
    );
    assert!(!project.path().join("src").exists());
}
