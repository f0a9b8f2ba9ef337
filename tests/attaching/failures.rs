use std::error::Error ;
use std::sync::Arc ;
use hitch::{ attach, AttachFailure, ConfigSection, InstantiationError, ManifestModule, Module, ModuleRegistry, PluginDescriptor, ProviderType, ServiceCollection, StaticModule };
use crate::test_plugins::{ failing_factory, FailingProvider, Greeter, GreeterProvider, NamedService, ServiceProvider };

fn descriptors( registry: &ModuleRegistry, module: impl Module + 'static ) -> Vec<( PluginDescriptor, Arc<dyn Module> )> {
	let module = registry.register( module );
	module.descriptors().expect( "valid metadata" ).into_iter()
		.map(| descriptor | ( descriptor, Arc::clone( &module )))
		.collect()
}

fn root() -> ConfigSection {
	ConfigSection::from_pairs([
		( "Plugins:Service:Sample:0", "First" ),
		( "Plugins:Service:Failing:0", "Broken" ),
		( "Plugins:Service:Sample:1", "Second" ),
	])
}

#[test]
fn attaching_failures_abort_and_keep_earlier_registrations() {

	let registry = ModuleRegistry::new();
	let descriptors = descriptors( &registry, StaticModule::new( "mixed" )
		.plugin::<GreeterProvider>()
		.categorized_plugin::<ServiceProvider>( "Service", "Sample" )
		.categorized_plugin::<FailingProvider>( "Service", "Failing" )
		.categorized_plugin::<ServiceProvider>( "Service", "Later" ));
	let mut services = ServiceCollection::new();

	let err = match attach( &descriptors, &root(), &mut services, &registry.catalog() ) {
		Err( err ) => err,
		Ok( attachments ) => panic!( "Expected failure, attached {:?}", attachments ),
	};

	assert_eq!( err.provider(), &ProviderType::of::<FailingProvider>() );
	assert_eq!( err.instance.as_deref(), Some( "Broken" ));
	assert!( matches!( err.cause, AttachFailure::Attach( _ )));
	assert_eq!(
		err.to_string(),
		format!( "Failed to attach plugin of type '{}' with name 'Broken'", ProviderType::of::<FailingProvider>() ),
	);
	assert!( err.source().is_some() );

	assert!( services.get::<Greeter>().is_some() );
	assert_eq!( services.names::<NamedService>(), vec![ "First", "Second" ]);
	assert_eq!( services.len(), 3 );

}

#[test]
fn attaching_failures_carry_the_descriptor() {

	let registry = ModuleRegistry::new();
	let descriptors = descriptors( &registry, StaticModule::new( "failing" )
		.categorized_plugin::<FailingProvider>( "Service", "Failing" ));
	let mut services = ServiceCollection::new();

	let err = attach( &descriptors, &root(), &mut services, &registry.catalog() ).expect_err( "should fail" );

	assert_eq!( err.descriptor, descriptors[0].0 );
	let category = err.category().expect( "categorized" );
	assert_eq!(( category.category(), category.sub_category() ), ( "Service", "Failing" ));

}

#[test]
fn attaching_failures_unnamed_instance_message() {

	let registry = ModuleRegistry::new();
	let descriptors = descriptors( &registry, StaticModule::new( "failing" ).plugin::<FailingProvider>() );
	let mut services = ServiceCollection::new();

	let err = attach( &descriptors, &ConfigSection::new(), &mut services, &registry.catalog() ).expect_err( "should fail" );

	assert_eq!( err.instance, None );
	assert!( err.category().is_none() );
	assert!( err.to_string().ends_with( "with name '(null)'" ));

}

#[test]
fn attaching_failures_unknown_provider_type_ends_pass() {

	let registry = ModuleRegistry::new();
	let manifest = ManifestModule::parse( "weather.toml".into(), "[[plugin]]\nprovider = \"weather::HealthProvider\"\n" )
		.expect( "valid TOML" );
	let mut declared = descriptors( &registry, manifest );
	declared.extend( descriptors( &registry, StaticModule::new( "greeter" ).plugin::<GreeterProvider>() ));
	let mut services = ServiceCollection::new();

	let err = attach( &declared, &ConfigSection::new(), &mut services, &registry.catalog() ).expect_err( "should fail" );

	assert_eq!( err.provider().name(), "weather::HealthProvider" );
	assert_eq!( err.to_string(), "Failed to attach plugin of type 'weather::HealthProvider' with name '(null)'" );
	match &err.cause {
		AttachFailure::Instantiation( InstantiationError::UnknownProvider( provider )) =>
			assert_eq!( provider.name(), "weather::HealthProvider" ),
		cause => panic!( "Unexpected cause: {}", cause ),
	}
	assert!( services.get::<Greeter>().is_none() );

}

#[test]
fn attaching_failures_registered_factory_resolves_manifest_provider() {

	let registry = ModuleRegistry::new();
	registry.register_factory( ProviderType::named( "weather::HealthProvider" ), hitch::default_factory::<GreeterProvider>() );
	let manifest = ManifestModule::parse( "weather.toml".into(), "[[plugin]]\nprovider = \"weather::HealthProvider\"\n" )
		.expect( "valid TOML" );
	let descriptors = descriptors( &registry, manifest );
	let mut services = ServiceCollection::new();

	let attachments = attach( &descriptors, &ConfigSection::new(), &mut services, &registry.catalog() ).expect( "attached" );

	assert_eq!( attachments.len(), 1 );
	assert!( services.get::<Greeter>().is_some() );

}

#[test]
fn attaching_failures_factory_error_ends_pass() {

	let registry = ModuleRegistry::new();
	let descriptors = descriptors( &registry, StaticModule::new( "exploding" )
		.categorized_plugin::<ServiceProvider>( "Service", "Sample" )
		.with_entry(
			ProviderType::named( "exploding::Provider" ),
			Some( "Service".to_string() ),
			Some( "Sample".to_string() ),
			failing_factory(),
		)
		.plugin::<GreeterProvider>() );
	let mut services = ServiceCollection::new();

	let err = attach( &descriptors, &root(), &mut services, &registry.catalog() ).expect_err( "should fail" );

	assert_eq!( err.provider().name(), "exploding::Provider" );
	assert_eq!( err.instance.as_deref(), Some( "First" ));
	assert!( matches!( err.cause, AttachFailure::Instantiation( InstantiationError::ConstructionFailed( _ ))));
	assert_eq!( services.names::<NamedService>(), vec![ "First", "Second" ]);
	assert!( services.get::<Greeter>().is_none() );

}
